pub(crate) mod log_panel;
