//! Input adapters. The GUI shell receives window and pointer events and
//! translates them into the view layer's input contract.

#[cfg(feature = "gui")]
pub mod gui;
