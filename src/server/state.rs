//! Application state shared across handlers

use crate::core::OrderIntake;

#[derive(Clone)]
pub struct AppState {
    pub intake: OrderIntake,
}

impl AppState {
    pub fn new(intake: OrderIntake) -> Self {
        Self { intake }
    }
}
