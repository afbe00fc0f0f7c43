//! Route state for page navigation.

use std::any::Any;

use bookshelf_states::{State, StateCtx, assign_impl};
use log::info;
use serde::{Deserialize, Serialize};

/// The page the application currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Login,
    Library,
    ForgetPassword,
    Register,
}

impl Route {
    pub const ALL: [Self; 4] = [
        Self::Login,
        Self::Library,
        Self::ForgetPassword,
        Self::Register,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Library => "/library",
            Self::ForgetPassword => "/forget-password",
            Self::Register => "/register",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl State for Route {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

pub fn navigate(ctx: &mut StateCtx, route: Route) {
    let current = *ctx.state::<Route>();
    if current != route {
        info!("navigate: {} -> {}", current.path(), route.path());
        *ctx.state_mut::<Route>() = route;
    }
}
