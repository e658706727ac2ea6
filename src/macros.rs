/// Writes a [`BijectiveMap`](crate::BijectiveMap) out in source.
///
/// ```
/// let digits = bijective::bijection! { 1 => "one", 2 => "two" };
/// assert_eq!(digits.domain_for(&"two"), Some(&2));
/// ```
///
/// # Panics
/// If two pairs share a domain or a codomain element. Tables written in source
/// are expected to be right; use [`BijectiveMap::try_from_pairs`](crate::BijectiveMap::try_from_pairs)
/// for anything else.
#[macro_export]
macro_rules! bijection {
    () => {
        $crate::BijectiveMap::new()
    };
    ($($domain:expr => $codomain:expr),+ $(,)?) => {
        $crate::BijectiveMap::from_literal([$(($domain, $codomain)),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::BijectiveMap;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    enum BinOp {
        Divide,
        GreaterThan,
        Subtract,
    }

    lazy_static::lazy_static! {
        static ref BIN_OP_TOKENS: BijectiveMap<BinOp, &'static str> = bijection! {
            BinOp::Divide => "/",
            BinOp::GreaterThan => ">",
            BinOp::Subtract => "-",
        };
    }

    #[test]
    fn static_token_table() {
        assert_eq!(BIN_OP_TOKENS.codomain_for(&BinOp::GreaterThan), Some(&">"));
        assert_eq!(BIN_OP_TOKENS.domain_for(&"-"), Some(&BinOp::Subtract));
        assert_eq!(BIN_OP_TOKENS.len(), 3);
    }

    #[test]
    fn empty_literal() {
        let empty: BijectiveMap<u8, u8> = bijection! {};
        assert!(empty.is_empty());
    }

    #[test]
    #[should_panic(expected = "bijection literal is not one-to-one (codomain collision)")]
    fn repeated_codomain_panics() {
        let _ = bijection! { 1 => 'a', 2 => 'a' };
    }

    #[test]
    #[should_panic(expected = "not one-to-one (domain collision)")]
    fn repeated_domain_panics() {
        let _ = bijection! { 1 => 'a', 1 => 'b' };
    }
}
