//! Screen layout constants.

/// Height of the title bar in lines.
///
/// Sits directly under the record viewport.
pub const TITLE_BAR_HEIGHT: u16 = 1;

/// Height of the status line in lines.
///
/// Bottom row of the screen.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows the viewport gives up to the title bar and status line.
pub const CHROME_HEIGHT: u16 = TITLE_BAR_HEIGHT + STATUS_BAR_HEIGHT;

/// Terminal size assumed when the real size cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);
