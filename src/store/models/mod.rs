mod blog;
mod booking;
mod calendar;
mod chat;
mod consult;
mod doctor;
mod earnings;
mod feedback;
mod support;
mod user;

pub use blog::*;
pub use booking::*;
pub use calendar::*;
pub use chat::*;
pub use consult::*;
pub use doctor::*;
pub use earnings::*;
pub use feedback::*;
pub use support::*;
pub use user::*;
