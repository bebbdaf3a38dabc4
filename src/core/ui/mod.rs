//=========================================================================
// UI Widgets
//=========================================================================
//
// Rectangle-only widgets shared by the menu-style states.
//
// Architecture:
//   Button      pointer hover / press / click, colour per visual state
//   ButtonList  buttons + actions, wrapping keyboard selection
//   ProgressBar displayed fill easing toward the target progress
//
//=========================================================================

//=== Module Declarations =================================================

mod button;
mod button_list;
mod progress_bar;

//=== Public API ==========================================================

pub use button::{Button, ButtonStyle, ButtonVisual};
pub use button_list::ButtonList;
pub use progress_bar::ProgressBar;
