use flagon::{FlagSet, FlagValue, Value, ValueMap};

/// The registry every scenario starts from: one string, one int, one list,
/// all still holding their defaults.
pub fn server_flags() -> FlagSet {
    let mut flags = FlagSet::new();
    flags.define("host", FlagValue::String("localhost".into()));
    flags.define("port", FlagValue::Int(8080));
    flags.define(
        "tags",
        FlagValue::StringList(vec!["a".into(), "b".into()]),
    );
    flags
}

/// Navigate a nested tree by path segments.
pub fn get_nested<'a>(tree: &'a ValueMap, path: &[&str]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = tree;
    for key in parents {
        current = current.get(*key)?.as_object()?;
    }
    current.get(*last)
}
