//! Smallest embedding: suites plus `test_main!`, no CLI of its own

use nutest::prelude::*;

fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

nutest::suite! {
    mod arithmetic = "Arithmetic";

    fn freezing_point() {
        check_near!(32.0_f32, celsius_to_fahrenheit(0.0), 0.001);
    }

    fn body_temperature() {
        check_near!(98.6_f32, celsius_to_fahrenheit(37.0), 0.01);
    }
}

nutest::suite! {
    mod text = "Text";

    fn trims() {
        check_str_eq!("port", "  port ".trim());
    }

    fn unicode_folding() {
        skip!("needs full case folding");
    }
}

nutest::test_main!(arithmetic, text);
