use nutest::prelude::*;

nutest::suite! {
    pub mod suite = "Floats";

    #[describe = "Values one epsilon apart compare equal"]
    fn single_precision() {
        check_f32_eq!(1.0_f32, 1.0_f32 + f32::EPSILON);
        check_f32_eq!(0.5_f32, 0.25_f32 * 2.0);
    }

    fn double_precision() {
        check_f64_eq!(0.3, 0.1 + 0.2);
    }

    #[describe = "Caller-chosen tolerance"]
    fn near_pi() {
        check_near!(std::f64::consts::PI, 22.0 / 7.0, 0.01);
        check_gt!(22.0 / 7.0, std::f64::consts::PI);
    }
}
