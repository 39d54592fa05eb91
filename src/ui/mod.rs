// Page behaviours. Each works against small capability traits so it can be
// driven without a browser document.

pub mod actions;
pub mod datepicker;
pub mod flash;
pub mod form_validation;
pub mod page;
pub mod preview;
pub mod rating;
pub mod search_type;
pub mod tasks;

pub use page::{autofill_from_config, bootstrap, Page, PageHandles};
