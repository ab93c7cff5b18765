use std::{fmt::Debug, hash::Hash};

/// Partitions subscribers of a [`Subject`](crate::Subject) into independent channels.
///
/// Any hashable, comparable, cloneable value works: strings, integers, enums,
/// small structs. A notification tagged with `a` only reaches callbacks that
/// subscribed with a tag equal to `a`.
///
/// The value returned by [`Default::default`] is reserved as the *untagged*
/// channel: [`Subject::subscribe`](crate::Subject::subscribe) and
/// [`Subject::notify`](crate::Subject::notify) are shorthands for the tagged
/// variants called with `T::default()`. A real tag equal to the default value
/// shares that channel, e.g. the empty string for `String` tags.
///
/// Tags must be `Send + Sync + 'static` because they are captured by
/// subscriptions, which may be dropped on any thread.
///
/// # Examples
///
/// ```rust
/// use herald::Subject;
///
/// #[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
/// enum Channel {
///     #[default]
///     Any,
///     Audio,
///     Video,
/// }
///
/// let subject = Subject::<Channel>::new();
/// let _sub = subject.subscribe_tagged(Channel::Audio, |volume: u8| println!("volume {volume}"));
/// subject.notify_tagged(&Channel::Audio, (11u8,));
/// ```
pub trait Tag: Hash + Eq + Clone + Default + Debug + Send + Sync + 'static {}

impl<T> Tag for T where T: Hash + Eq + Clone + Default + Debug + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel<T: Tag>() -> T {
        T::default()
    }

    #[test]
    fn test_string_sentinel_is_empty() {
        assert_eq!(sentinel::<String>(), "");
    }

    #[test]
    fn test_tag_as_enum() {
        #[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
        enum TestTag {
            #[default]
            Untagged,
            #[allow(dead_code)]
            IoT,
        }
        assert_eq!(sentinel::<TestTag>(), TestTag::Untagged);
    }

    #[test]
    fn test_tag_as_struct() {
        #[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
        struct TestTag {
            name: String,
            shard: u16,
        }
        assert_eq!(
            sentinel::<TestTag>(),
            TestTag {
                name: String::new(),
                shard: 0
            }
        );
    }
}
