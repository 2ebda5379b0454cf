pub mod cv;
pub mod health;
pub mod pages;

pub use cv::download_cv;
pub use health::health_check;
pub use pages::{
    education_page, experience_page, home_page, projects_page, recognitions_page, sale_page,
};
