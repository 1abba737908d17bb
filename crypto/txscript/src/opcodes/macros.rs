macro_rules! opcode_list {
    ( $( $name:ident = $num:literal as $symbol:literal ),* $(,)? ) => {
        pub mod codes {
            $(
                #[allow(non_upper_case_globals)]
                #[allow(dead_code)]
                pub const $name: u8 = $num;
            )*
        }

        /// Returns the symbolic name of a non-push opcode, if it is known.
        pub fn symbol(opcode: u8) -> Option<&'static str> {
            match opcode {
                $(
                    $num => Some($symbol),
                )*
                #[allow(unreachable_patterns)]
                _ => None,
            }
        }
    };
}
