mod eyes;
mod guide;
mod popup;
mod status_bar;
mod steps;

pub use eyes::{pupil_cell, EyesWidget};
pub use guide::{guide_bounds, sample_path, state_color, GuideWidget};
pub use popup::{centered_rect, PopupWidget};
pub use status_bar::StatusBarWidget;
pub use steps::StepsWidget;
