mod select_list;

pub use select_list::{SelectList, SelectListEvent, SelectRow};
