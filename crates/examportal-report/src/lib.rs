//! examportal-report — renders result pages to self-contained HTML.

pub mod html;
