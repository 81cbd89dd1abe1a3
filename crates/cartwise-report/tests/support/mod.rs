pub mod reportkit;
