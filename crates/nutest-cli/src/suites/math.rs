use nutest::prelude::*;

pub fn add(a: i32, b: i32) -> i32 {
    a + b
}

/// Off by one on purpose: `Math.add_bug` shows what a failure looks like
pub fn add_with_bug(a: i32, b: i32) -> i32 {
    a + b + 1
}

nutest::suite! {
    #[describe = "Integer arithmetic"]
    pub mod suite = "Math";

    #[describe = "Small sums come out right"]
    fn add_ok() {
        check_eq!(5, add(2, 3));
        check_eq!(0, add(-4, 4));
        check_lt!(add(1, 1), add(2, 1));
    }

    #[describe = "Demonstrates a failing check"]
    fn add_bug() {
        check_eq!(5, add_with_bug(2, 3));
    }

    #[describe = "Superseded by add_ok"]
    fn legacy() {
        skip!("kept to show how skips are reported");
    }
}
