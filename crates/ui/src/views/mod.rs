mod home;
mod loading;
mod overlay;
mod quiz;
mod result;
mod screen;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use loading::LoadingView;
pub use overlay::ErrorOverlay;
pub use quiz::QuizView;
pub use result::ResultView;
pub use screen::{QuizIntent, QuizScreen};
