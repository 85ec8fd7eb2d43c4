// Module exports for pure logic
pub mod accounts;    // Account store and its operations
pub mod observers;   // Change notification
pub mod tag_input;   // Tag commit key handling
