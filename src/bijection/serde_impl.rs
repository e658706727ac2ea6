//! A bijection travels as its forward association, e.g. a JSON object keyed by
//! domain element, and is validated on the way back in.

use std::{fmt, hash::Hash, marker::PhantomData};

use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use super::BijectiveMap;

impl<D, C> Serialize for BijectiveMap<D, C>
where
    D: Eq + Hash + Clone + Serialize,
    C: Eq + Hash + Clone + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

struct BijectiveMapVisitor<D, C>(PhantomData<fn() -> (D, C)>);

impl<'de, D, C> Visitor<'de> for BijectiveMapVisitor<D, C>
where
    D: Eq + Hash + Clone + Deserialize<'de>,
    C: Eq + Hash + Clone + Deserialize<'de>,
{
    type Value = BijectiveMap<D, C>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with no repeated keys or values")
    }

    /// Entries go through [`BijectiveMap::try_insert`] in input order, so a
    /// repeated key fails here instead of overwriting the earlier entry.
    ///
    /// The error names only the collision shape; `D` and `C` need not be `Debug`.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = BijectiveMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((domain, codomain)) = access.next_entry::<D, C>()? {
            result.try_insert(domain, codomain).map_err(|err| {
                tracing::debug!(kind = err.conflict().kind(), "rejected serialized map");
                <A::Error as de::Error>::custom(format!(
                    "map is not one-to-one ({} collision)",
                    err.conflict().kind()
                ))
            })?;
        }
        Ok(result)
    }
}

impl<'de, D, C> Deserialize<'de> for BijectiveMap<D, C>
where
    D: Eq + Hash + Clone + Deserialize<'de>,
    C: Eq + Hash + Clone + Deserialize<'de>,
{
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        deserializer.deserialize_map(BijectiveMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_forward_object() {
        let map = BijectiveMap::try_from([("one".to_string(), 1)]).unwrap();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"one":1}"#);
    }

    #[test]
    fn deserializes_through_strict_construction() {
        let map: BijectiveMap<String, u8> =
            serde_json::from_str(r#"{"one": 1, "two": 2, "three": 3}"#).unwrap();
        assert_eq!(map.domain_for(&2), Some(&"two".to_string()));
        assert_eq!(
            serde_json::from_str::<BijectiveMap<String, u8>>(&serde_json::to_string(&map).unwrap())
                .unwrap(),
            map
        );

        let err = serde_json::from_str::<BijectiveMap<String, u8>>(r#"{"a": 1, "b": 1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("not one-to-one (codomain collision)"));
    }

    #[test]
    fn repeated_key_is_rejected() {
        let err = serde_json::from_str::<BijectiveMap<String, u8>>(r#"{"a": 1, "a": 2}"#)
            .unwrap_err();
        assert!(err.to_string().contains("not one-to-one (domain collision)"));

        // a repeated identical entry stores nothing new
        let map: BijectiveMap<String, u8> = serde_json::from_str(r#"{"a": 1, "a": 1}"#).unwrap();
        assert_eq!(map.len(), 1);
    }
}
