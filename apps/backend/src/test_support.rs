//! Helpers for unit tests inside the crate.

use std::sync::Arc;

use crate::auth::password::PasswordCost;
use crate::auth::{Identity, SessionAuthority, StaticCredentialStore};
use crate::config::DemoUser;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

pub fn demo_identity() -> Identity {
    DemoUser::default().identity()
}

pub fn test_sessions() -> SessionAuthority {
    let demo = DemoUser::default();
    let store = StaticCredentialStore::new(demo.identity(), &demo.password, PasswordCost::Low)
        .expect("static store");
    SessionAuthority::new(SecurityConfig::for_tests(), Arc::new(store))
}

pub fn state_without_db() -> AppState {
    AppState::without_db(SecurityConfig::for_tests(), test_sessions())
}
