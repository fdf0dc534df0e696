#![allow(dead_code)]

use commandeer::{Registry, Target, args, shared};
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// Test Domain Object
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Division by zero")]
pub struct DivisionByZero;

#[derive(Debug, Default)]
pub struct Subject {
    value: i32,
}

impl Subject {
    pub fn with_value(value: i32) -> Self {
        Self { value }
    }

    pub fn f3(&mut self, arg1: i32, arg2: i32) -> i32 {
        arg1 * arg2
    }

    pub fn f2(&mut self, arg1: i32) -> i32 {
        arg1 * 2
    }

    pub fn f0(&mut self) -> i32 {
        42
    }

    pub fn concatenate(&mut self, a: String, b: String) -> String {
        a + &b
    }

    pub fn divide(&mut self, a: f64, b: f64) -> Result<f64, DivisionByZero> {
        if b == 0.0 {
            return Err(DivisionByZero);
        }
        Ok(a / b)
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn multiply_by(&self, factor: i32) -> i32 {
        self.value * factor
    }

    pub fn description(&self) -> String {
        format!("Subject with value: {}", self.value)
    }

    pub fn add(&self, a: i32, b: i32) -> i32 {
        a + b
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn subject() -> Target<Subject> {
    shared(Subject::default())
}

/// A registry with `command1` (f3, defaults 10/20) registered on `subject`.
pub fn registry_with_f3(subject: &Target<Subject>) -> Registry {
    let mut registry = Registry::new();
    registry
        .register_method(
            "command1",
            Arc::downgrade(subject),
            Subject::f3,
            args! { "arg1" => 10, "arg2" => 20 },
        )
        .unwrap();
    registry
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
