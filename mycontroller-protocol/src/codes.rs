//! Fixed input codes used by the controller app
//!
//! Sliders, joysticks and orientation each report under a short fixed name.
//! Special keys have fixed lowercase codes; every other key is free-form.

/// Requested key state for a key query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    Pressed,
    Released,
}

/// Special keys of the app's built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowRight,
    ArrowLeft,
    Enter,
    Space,
}

impl KeyCode {
    /// Wire code of this key
    pub const fn label(self) -> &'static str {
        match self {
            KeyCode::ArrowUp => "up",
            KeyCode::ArrowDown => "down",
            KeyCode::ArrowRight => "right",
            KeyCode::ArrowLeft => "left",
            KeyCode::Enter => "enter",
            KeyCode::Space => "space",
        }
    }
}

/// Side of a two-handed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSide {
    Right,
    Left,
}

/// Joystick axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoystickAxis {
    X,
    Y,
}

/// Phone orientation channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OrientationAxis {
    X,
    Y,
    Z,
    Compass,
}

/// Every scalar input channel the app reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisCode {
    SliderRight,
    SliderLeft,
    JoystickRightX,
    JoystickRightY,
    JoystickLeftX,
    JoystickLeftY,
    OrientationX,
    OrientationY,
    OrientationZ,
    OrientationCompass,
}

impl AxisCode {
    /// Number of axis channels
    pub const COUNT: usize = 10;

    /// All axis channels in cache order
    pub const ALL: [AxisCode; Self::COUNT] = [
        AxisCode::SliderRight,
        AxisCode::SliderLeft,
        AxisCode::JoystickRightX,
        AxisCode::JoystickRightY,
        AxisCode::JoystickLeftX,
        AxisCode::JoystickLeftY,
        AxisCode::OrientationX,
        AxisCode::OrientationY,
        AxisCode::OrientationZ,
        AxisCode::OrientationCompass,
    ];

    /// Slider channel for a side
    pub const fn slider(side: InputSide) -> Self {
        match side {
            InputSide::Right => AxisCode::SliderRight,
            InputSide::Left => AxisCode::SliderLeft,
        }
    }

    /// Joystick channel for a side and axis
    pub const fn joystick(side: InputSide, axis: JoystickAxis) -> Self {
        match (side, axis) {
            (InputSide::Right, JoystickAxis::X) => AxisCode::JoystickRightX,
            (InputSide::Right, JoystickAxis::Y) => AxisCode::JoystickRightY,
            (InputSide::Left, JoystickAxis::X) => AxisCode::JoystickLeftX,
            (InputSide::Left, JoystickAxis::Y) => AxisCode::JoystickLeftY,
        }
    }

    /// Orientation channel
    pub const fn orientation(axis: OrientationAxis) -> Self {
        match axis {
            OrientationAxis::X => AxisCode::OrientationX,
            OrientationAxis::Y => AxisCode::OrientationY,
            OrientationAxis::Z => AxisCode::OrientationZ,
            OrientationAxis::Compass => AxisCode::OrientationCompass,
        }
    }

    /// Command name the app uses for this channel
    pub const fn code(self) -> &'static str {
        match self {
            AxisCode::SliderRight => "sr",
            AxisCode::SliderLeft => "sl",
            AxisCode::JoystickRightX => "jrx",
            AxisCode::JoystickRightY => "jry",
            AxisCode::JoystickLeftX => "jlx",
            AxisCode::JoystickLeftY => "jly",
            AxisCode::OrientationX => "ox",
            AxisCode::OrientationY => "oy",
            AxisCode::OrientationZ => "oz",
            AxisCode::OrientationCompass => "oc",
        }
    }

    /// Look up the channel for a command name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.code() == name)
    }

    /// Position of this channel in [`AxisCode::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Button color in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyColor {
    #[default]
    Black,
    Green,
    Blue,
    Yellow,
    Red,
}

impl KeyColor {
    /// Wire value
    pub const fn to_wire(self) -> u8 {
        match self {
            KeyColor::Black => 0,
            KeyColor::Green => 1,
            KeyColor::Blue => 2,
            KeyColor::Yellow => 3,
            KeyColor::Red => 4,
        }
    }

    /// Parse a lowercase color name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(KeyColor::Black),
            "green" => Some(KeyColor::Green),
            "blue" => Some(KeyColor::Blue),
            "yellow" => Some(KeyColor::Yellow),
            "red" => Some(KeyColor::Red),
            _ => None,
        }
    }
}

/// Button visibility in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyVisibility {
    #[default]
    Visible,
    Hidden,
}

impl KeyVisibility {
    /// Wire value
    pub const fn to_wire(self) -> u8 {
        match self {
            KeyVisibility::Visible => 1,
            KeyVisibility::Hidden => 0,
        }
    }
}
