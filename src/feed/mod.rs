//! Upstream feed clients and background pollers

pub mod checkin;
pub mod poller;
pub mod retry;
pub mod sheet;

pub use checkin::{CheckinApi, CheckinClient};
pub use poller::{spawn_checkin_poller, spawn_keep_alive, spawn_sheet_poller};
pub use sheet::{SheetApi, SheetClient};
