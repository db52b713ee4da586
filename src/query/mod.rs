pub mod debounce;
pub mod search;
pub mod sort;
pub mod view;
