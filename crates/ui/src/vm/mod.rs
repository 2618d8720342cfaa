mod home_vm;
mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use home_vm::HomeVm;
pub use quiz_vm::{OptionVm, QuizVm, TimerVm};
pub use result_vm::ResultVm;
pub use time_fmt::{completion_label, timer_label};
