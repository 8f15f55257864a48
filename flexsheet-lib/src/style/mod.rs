pub mod computed;
pub mod inline;
pub mod prefixer;
pub mod sink;
pub mod styler;
pub mod value;
pub mod virtual_sheet;
