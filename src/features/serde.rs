use core::{fmt, marker::PhantomData};

use allocator_api2::alloc::Allocator;
use serde::{
    de::{self, DeserializeSeed, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{Error, ManagedVec};

const AN_ARRAY: &str = "an array";

fn map_error<E: de::Error>(result: Result<(), Error>) -> Result<(), E> {
    match result {
        Ok(()) => Ok(()),
        Err(error) => Err(E::custom(error)),
    }
}

impl<T: Serialize, A: Allocator> Serialize for ManagedVec<T, A> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        <[T]>::serialize(self, serializer)
    }
}

/// Deserializes into a new active vector.
impl<'de, T, A> Deserialize<'de> for ManagedVec<T, A>
where
    T: Deserialize<'de>,
    A: Allocator + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VecVisitor<T, A>(PhantomData<(T, A)>);

        impl<'de, T, A> Visitor<'de> for VecVisitor<T, A>
        where
            T: Deserialize<'de>,
            A: Allocator + Default,
        {
            type Value = ManagedVec<T, A>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(AN_ARRAY)
            }

            fn visit_seq<Seq>(self, seq: Seq) -> Result<Self::Value, Seq::Error>
            where
                Seq: SeqAccess<'de>,
            {
                let mut vec = ManagedVec::new_in(A::default());
                Visitor::visit_seq(&mut vec, seq)?;
                Ok(vec)
            }
        }

        deserializer.deserialize_seq(VecVisitor(PhantomData))
    }
}

/// Appends the deserialized elements to an existing vector.
impl<'de, T: Deserialize<'de>, A: Allocator> DeserializeSeed<'de> for &'_ mut ManagedVec<T, A> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, T: Deserialize<'de>, A: Allocator> Visitor<'de> for &'_ mut ManagedVec<T, A> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(AN_ARRAY)
    }

    fn visit_seq<Seq>(self, mut seq: Seq) -> Result<Self::Value, Seq::Error>
    where
        Seq: SeqAccess<'de>,
    {
        if let Some(size_hint) = seq.size_hint() {
            let required = self.len().saturating_add(size_hint);
            map_error(self.reserve(required))?;
        }

        while let Some(elem) = seq.next_element()? {
            map_error(self.push_back(elem))?;
        }

        Ok(())
    }
}
