//! Inline style model.
//!
//! The orchestrator never defines how a transition renders. It only writes
//! inline declarations (opacity, transform, transition, ...) and state
//! classes, the same contract the stylesheet relies on.

use std::fmt;

use crate::animation::Easing;

/// A CSS length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Px(f32),
    /// Percentage of the element's own box.
    Percent(f32),
}

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self::Px(0.0);

    /// Returns true for a zero length of either unit.
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Px(v) | Self::Percent(v) => v == 0.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// A 2D transform: translate, then scale, then rotate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Horizontal translation.
    pub translate_x: Length,
    /// Vertical translation.
    pub translate_y: Length,
    /// Horizontal scale factor.
    pub scale_x: f32,
    /// Vertical scale factor.
    pub scale_y: f32,
    /// Rotation in degrees.
    pub rotate_deg: f32,
}

impl Transform {
    /// The resting transform.
    pub const IDENTITY: Self = Self {
        translate_x: Length::ZERO,
        translate_y: Length::ZERO,
        scale_x: 1.0,
        scale_y: 1.0,
        rotate_deg: 0.0,
    };

    /// Horizontal translation only.
    #[must_use]
    pub const fn translate_x(x: Length) -> Self {
        Self {
            translate_x: x,
            ..Self::IDENTITY
        }
    }

    /// Vertical translation only.
    #[must_use]
    pub const fn translate_y(y: Length) -> Self {
        Self {
            translate_y: y,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale only.
    #[must_use]
    pub const fn scale(s: f32) -> Self {
        Self {
            scale_x: s,
            scale_y: s,
            ..Self::IDENTITY
        }
    }

    /// Vertical scale only.
    #[must_use]
    pub const fn scale_y(s: f32) -> Self {
        Self {
            scale_y: s,
            ..Self::IDENTITY
        }
    }

    /// Adds a vertical translation.
    #[must_use]
    pub const fn then_translate_y(mut self, y: Length) -> Self {
        self.translate_y = y;
        self
    }

    /// Adds a rotation.
    #[must_use]
    pub const fn rotated(mut self, deg: f32) -> Self {
        self.rotate_deg = deg;
        self
    }

    /// Returns true if this transform leaves the element at rest.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.translate_x.is_zero()
            && self.translate_y.is_zero()
            && self.scale_x == 1.0
            && self.scale_y == 1.0
            && self.rotate_deg == 0.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("none");
        }

        let mut parts = Vec::with_capacity(4);
        if !self.translate_x.is_zero() {
            parts.push(format!("translateX({})", self.translate_x));
        }
        if !self.translate_y.is_zero() {
            parts.push(format!("translateY({})", self.translate_y));
        }
        match (self.scale_x == 1.0, self.scale_y == 1.0) {
            (true, true) => {}
            (true, false) => parts.push(format!("scaleY({})", self.scale_y)),
            (false, true) => parts.push(format!("scaleX({})", self.scale_x)),
            (false, false) if self.scale_x == self.scale_y => {
                parts.push(format!("scale({})", self.scale_x));
            }
            (false, false) => parts.push(format!("scale({}, {})", self.scale_x, self.scale_y)),
        }
        if self.rotate_deg != 0.0 {
            parts.push(format!("rotate({}deg)", self.rotate_deg));
        }
        f.write_str(&parts.join(" "))
    }
}

/// Property a transition declaration covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionProperty {
    /// Every animatable property.
    All,
    /// Opacity only.
    Opacity,
    /// Transform only.
    Transform,
    /// Height only.
    Height,
}

/// An inline transition declaration, e.g. `all 0.4s ease-out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Covered property.
    pub property: TransitionProperty,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Timing function.
    pub easing: Easing,
}

impl Transition {
    /// `all <duration> ease-out`.
    #[must_use]
    pub const fn all(duration_ms: u64) -> Self {
        Self {
            property: TransitionProperty::All,
            duration_ms,
            easing: Easing::EaseOut,
        }
    }

    /// `<property> <duration> ease-out`.
    #[must_use]
    pub const fn of(property: TransitionProperty, duration_ms: u64) -> Self {
        Self {
            property,
            duration_ms,
            easing: Easing::EaseOut,
        }
    }

    /// Returns true if this declaration animates opacity.
    #[must_use]
    pub fn covers_opacity(&self) -> bool {
        matches!(self.property, TransitionProperty::All | TransitionProperty::Opacity)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = match self.property {
            TransitionProperty::All => "all",
            TransitionProperty::Opacity => "opacity",
            TransitionProperty::Transform => "transform",
            TransitionProperty::Height => "height",
        };
        #[allow(clippy::cast_precision_loss)]
        let seconds = self.duration_ms as f64 / 1000.0;
        write!(f, "{property} {seconds}s {}", self.easing.css_name())
    }
}

/// Class toggled on elements to expose orchestrator state to the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateClass {
    /// Active nav entry / visible page.
    Active,
    /// Collapsed sidebar.
    Collapsed,
}

impl StateClass {
    /// Class name as written in the markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Collapsed => "collapsed",
        }
    }
}

/// A single inline property write. `None` clears the declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleProp {
    /// `opacity`.
    Opacity(Option<f32>),
    /// `transform`.
    Transform(Option<Transform>),
    /// `transition`.
    Transition(Option<Transition>),
    /// `height`.
    Height(Option<String>),
    /// `animation`.
    Animation(Option<String>),
    /// `color`.
    Color(Option<String>),
    /// `box-shadow`.
    BoxShadow(Option<String>),
}

/// Ordered list of inline property writes, applied in one go.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    props: Vec<StyleProp>,
}

impl StylePatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the writes in application order.
    #[must_use]
    pub fn props(&self) -> &[StyleProp] {
        &self.props
    }

    /// Returns true if the patch writes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    fn with(mut self, prop: StyleProp) -> Self {
        self.props.push(prop);
        self
    }

    /// Sets opacity.
    #[must_use]
    pub fn opacity(self, value: f32) -> Self {
        self.with(StyleProp::Opacity(Some(value)))
    }

    /// Sets transform.
    #[must_use]
    pub fn transform(self, value: Transform) -> Self {
        self.with(StyleProp::Transform(Some(value)))
    }

    /// Sets transition.
    #[must_use]
    pub fn transition(self, value: Transition) -> Self {
        self.with(StyleProp::Transition(Some(value)))
    }

    /// Sets height.
    #[must_use]
    pub fn height(self, value: impl Into<String>) -> Self {
        self.with(StyleProp::Height(Some(value.into())))
    }

    /// Sets animation.
    #[must_use]
    pub fn animation(self, value: impl Into<String>) -> Self {
        self.with(StyleProp::Animation(Some(value.into())))
    }

    /// Sets color.
    #[must_use]
    pub fn color(self, value: impl Into<String>) -> Self {
        self.with(StyleProp::Color(Some(value.into())))
    }

    /// Sets box shadow.
    #[must_use]
    pub fn box_shadow(self, value: impl Into<String>) -> Self {
        self.with(StyleProp::BoxShadow(Some(value.into())))
    }

    /// Clears opacity.
    #[must_use]
    pub fn clear_opacity(self) -> Self {
        self.with(StyleProp::Opacity(None))
    }

    /// Clears transform.
    #[must_use]
    pub fn clear_transform(self) -> Self {
        self.with(StyleProp::Transform(None))
    }

    /// Clears animation.
    #[must_use]
    pub fn clear_animation(self) -> Self {
        self.with(StyleProp::Animation(None))
    }

    /// Clears color.
    #[must_use]
    pub fn clear_color(self) -> Self {
        self.with(StyleProp::Color(None))
    }

    /// Clears box shadow.
    #[must_use]
    pub fn clear_box_shadow(self) -> Self {
        self.with(StyleProp::BoxShadow(None))
    }
}

/// Inline declarations currently set on an element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    /// `opacity`, if set.
    pub opacity: Option<f32>,
    /// `transform`, if set.
    pub transform: Option<Transform>,
    /// `transition`, if set.
    pub transition: Option<Transition>,
    /// `height`, if set.
    pub height: Option<String>,
    /// `animation`, if set.
    pub animation: Option<String>,
    /// `color`, if set.
    pub color: Option<String>,
    /// `box-shadow`, if set.
    pub box_shadow: Option<String>,
}

impl InlineStyle {
    /// Applies every write of the patch, in order.
    pub fn apply(&mut self, patch: &StylePatch) {
        for prop in patch.props() {
            match prop.clone() {
                StyleProp::Opacity(v) => self.opacity = v,
                StyleProp::Transform(v) => self.transform = v,
                StyleProp::Transition(v) => self.transition = v,
                StyleProp::Height(v) => self.height = v,
                StyleProp::Animation(v) => self.animation = v,
                StyleProp::Color(v) => self.color = v,
                StyleProp::BoxShadow(v) => self.box_shadow = v,
            }
        }
    }

    /// Renders the declarations as a `style` attribute.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut decls = Vec::new();
        if let Some(v) = self.opacity {
            decls.push(format!("opacity: {v}"));
        }
        if let Some(v) = self.transform {
            decls.push(format!("transform: {v}"));
        }
        if let Some(v) = self.transition {
            decls.push(format!("transition: {v}"));
        }
        if let Some(v) = &self.height {
            decls.push(format!("height: {v}"));
        }
        if let Some(v) = &self.animation {
            decls.push(format!("animation: {v}"));
        }
        if let Some(v) = &self.color {
            decls.push(format!("color: {v}"));
        }
        if let Some(v) = &self.box_shadow {
            decls.push(format!("box-shadow: {v}"));
        }
        decls.join("; ")
    }
}
