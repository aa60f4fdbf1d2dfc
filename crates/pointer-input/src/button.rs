/// Logical pointer buttons tracked by a [`PointerDevice`](crate::PointerDevice).
///
/// The discriminants match the platform button codes (`0` primary, `1`
/// auxiliary/middle, `2` secondary/right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Auxiliary = 1,
    Secondary = 2,
}

impl PointerButton {
    /// Number of tracked buttons.
    pub const COUNT: usize = 3;

    /// All buttons in index order.
    pub const ALL: [PointerButton; Self::COUNT] = [
        PointerButton::Primary,
        PointerButton::Auxiliary,
        PointerButton::Secondary,
    ];

    /// Get the array index for this button.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a platform button code. Codes outside the tracked range
    /// (back/forward buttons, negative "no button" codes) yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Auxiliary),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}
