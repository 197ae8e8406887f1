use nutest::prelude::*;

fn shout(text: &str) -> String {
    format!("{}!", text.to_uppercase())
}

nutest::suite! {
    #[describe = "String building"]
    pub mod suite = "Strings";

    fn concat() {
        let greeting = ["hello", " ", "world"].concat();
        check_str_eq!("hello world", greeting);
        check_eq!(greeting.len(), 11);
    }

    fn shout_uppercases() {
        check_str_eq!("HEY!", shout("hey"));
        check_str_ne!("hey", shout("hey"));
    }

    #[describe = "A body may end with a fallible expression"]
    fn parses_port() {
        let port = "8080".parse::<u16>();
        check_eq!(port, Ok(8080));
        port.map(drop)
    }
}
