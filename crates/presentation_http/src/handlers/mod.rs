//! HTTP request handlers

pub mod health;
pub mod map;
pub mod page;
pub mod planner;
pub mod route;
pub mod search;
pub mod share;
pub mod waypoints;
