use nutest::prelude::*;
use std::ptr;

nutest::suite! {
    #[describe = "Pointers and raw bytes"]
    pub mod suite = "Memory";

    fn pointers() {
        let value = 7_u32;
        let present: *const u32 = &value;
        let missing: *const u32 = ptr::null();
        check_not_null!(present);
        check_null!(missing);
    }

    fn options() {
        let empty: Option<&str> = None;
        check_null!(empty);
        check_not_null!(Some("x"));
    }

    #[describe = "Only the first len bytes are compared"]
    fn byte_prefix() {
        let header = *b"NUT1";
        let frame = b"NUT1-payload".to_vec();
        check_mem_eq!(header, frame, 4);
        check_mem_eq!("NUT", header, 3);
    }
}
