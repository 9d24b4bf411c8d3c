use super::array_collection::ArrayCollection;
use crate::core::{CollectionError, Result, Value};

impl ArrayCollection {
    /// Builds a collection from loosely shaped items.
    ///
    /// Each item is normalized into one entry:
    /// - an empty array is skipped;
    /// - `[k]` becomes `(k, Null)`;
    /// - `[k, v]` becomes `(k, v)`;
    /// - `[k, v1, v2, ..]` becomes `(k, [v1, v2, ..])`;
    /// - a scalar `s` becomes `(s, Null)`.
    ///
    /// Objects and `Null` are rejected with [`CollectionError::InvalidInput`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tuplebag::{ArrayCollection, Entry, Value};
    ///
    /// let bag = ArrayCollection::from_raw(vec![
    ///     Value::from(vec![5, 5, 5]),
    ///     Value::from("solo"),
    /// ])?;
    /// assert_eq!(bag.all(), &[
    ///     Entry::new(5, vec![5, 5]),
    ///     Entry::new("solo", Value::Null),
    /// ]);
    /// # Ok::<(), tuplebag::CollectionError>(())
    /// ```
    pub fn from_raw<I>(items: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut collection = Self::new();
        for (index, item) in items.into_iter().enumerate() {
            let item: Value = item.into();
            match item {
                Value::Array(parts) => {
                    let mut parts = parts.into_iter();
                    let Some(key) = parts.next() else {
                        continue;
                    };
                    let mut rest: Vec<Value> = parts.collect();
                    let value = if rest.len() > 1 {
                        Value::Array(rest)
                    } else {
                        rest.pop().unwrap_or(Value::Null)
                    };
                    collection.put(key, value);
                }
                scalar if scalar.is_scalar() => collection.put(scalar, Value::Null),
                other => {
                    return Err(CollectionError::InvalidInput(format!(
                        "expects a sequence of tuples or scalars, item {} is {}",
                        index,
                        other.type_name()
                    )));
                }
            }
        }
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Entry;
    use crate::core::ObjectRef;

    #[test]
    fn test_tuples_become_entries() {
        let c = ArrayCollection::from_raw(vec![
            Value::from(vec![Value::from("a"), Value::from(1)]),
            Value::from(vec![Value::from("b"), Value::from(2)]),
            Value::from(vec![Value::from("a"), Value::from(3)]),
        ])
        .unwrap();
        assert_eq!(c.count(), 3);
        assert_eq!(c.count_keys_of(&Value::from("a")), 2);
    }

    #[test]
    fn test_shapes() {
        let c = ArrayCollection::from_raw(vec![
            Value::Array(vec![]),
            Value::from(vec!["only"]),
            Value::from(vec!["multiple", "tank", "city"]),
            Value::from(42),
        ])
        .unwrap();
        assert_eq!(
            c.all(),
            &[
                Entry::new("only", Value::Null),
                Entry::new("multiple", vec!["tank", "city"]),
                Entry::new(42, Value::Null),
            ]
        );
    }

    #[test]
    fn test_nested_key_is_kept_whole() {
        let c = ArrayCollection::from_raw(vec![Value::Array(vec![
            Value::from(vec![5, 5, 5]),
            Value::from("value2"),
        ])])
        .unwrap();
        assert_eq!(c.all(), &[Entry::new(vec![5, 5, 5], "value2")]);
    }

    #[test]
    fn test_bare_object_rejected() {
        let err = ArrayCollection::from_raw(vec![
            Value::from(1),
            Value::Object(ObjectRef::empty()),
        ])
        .unwrap_err();
        assert!(matches!(err, CollectionError::InvalidInput(_)));
    }

    #[test]
    fn test_null_item_rejected() {
        assert!(ArrayCollection::from_raw(vec![Value::Null]).is_err());
    }

    #[test]
    fn test_empty_input() {
        let c = ArrayCollection::from_raw(Vec::<Value>::new()).unwrap();
        assert!(c.is_empty());
    }
}
