use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use mongodb::bson::Bson;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Names the short tag a record's ids are prefixed with.
pub trait TypedIdMarker {
    fn tag() -> &'static str;
}

/// A uuid tagged with the kind of record it identifies, so that a camper id
/// can't be handed to a function expecting an activity id.
///
/// Written as `<TAG>-<UUID>` in urls, json and the database, e.g.
/// `CMP-16E77539-8873-4C8A-BCA3-2036010474AD`.
pub struct TypedId<T: TypedIdMarker> {
    uuid: Uuid,
    marker: PhantomData<fn() -> T>,
}

impl<T: TypedIdMarker> TypedId<T> {
    pub fn new() -> TypedId<T> {
        TypedId::from_uuid(Uuid::new_v4())
    }

    fn from_uuid(uuid: Uuid) -> TypedId<T> {
        TypedId {
            uuid,
            marker: PhantomData,
        }
    }
}

impl<T: TypedIdMarker> Copy for TypedId<T> {}

impl<T: TypedIdMarker> Clone for TypedId<T> {
    fn clone(&self) -> TypedId<T> {
        *self
    }
}

impl<T: TypedIdMarker> PartialEq for TypedId<T> {
    fn eq(&self, other: &TypedId<T>) -> bool {
        self.uuid == other.uuid
    }
}

impl<T: TypedIdMarker> Eq for TypedId<T> {}

impl<T: TypedIdMarker> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state)
    }
}

impl<T: TypedIdMarker> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:X}", T::tag(), self.uuid)
    }
}

impl<T: TypedIdMarker> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl<T: TypedIdMarker> FromStr for TypedId<T> {
    type Err = TypedIdParseError;

    fn from_str(s: &str) -> Result<TypedId<T>, TypedIdParseError> {
        match s.split_once('-') {
            Some((tag, uuid)) if tag == T::tag() => Uuid::parse_str(uuid)
                .map(TypedId::from_uuid)
                .map_err(|_| TypedIdParseError::InvalidUuid),
            Some(_) => Err(TypedIdParseError::InvalidTag {
                expected: T::tag(),
            }),
            None => Err(TypedIdParseError::InvalidFormat),
        }
    }
}

impl<T: TypedIdMarker> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: TypedIdMarker> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<TypedId<T>, D::Error> {
        deserializer.deserialize_str(TypedIdVisitor(PhantomData))
    }
}

struct TypedIdVisitor<T>(PhantomData<fn() -> T>);

impl<'de, T: TypedIdMarker> Visitor<'de> for TypedIdVisitor<T> {
    type Value = TypedId<T>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "an id of the form {}-<UUID>", T::tag())
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<TypedId<T>, E> {
        value.parse().map_err(E::custom)
    }
}

impl<T: TypedIdMarker> From<TypedId<T>> for Bson {
    fn from(id: TypedId<T>) -> Bson {
        Bson::String(id.to_string())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypedIdParseError {
    InvalidFormat,
    InvalidTag { expected: &'static str },
    InvalidUuid,
}

impl Display for TypedIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypedIdParseError::InvalidFormat => write!(f, "id is missing its tag"),
            TypedIdParseError::InvalidTag { expected } => {
                write!(f, "id should start with {}-", expected)
            }
            TypedIdParseError::InvalidUuid => write!(f, "id does not contain a valid uuid"),
        }
    }
}
