macro_rules! id {
    ($ident:ident) => {
        #[::nutype::nutype(
            validate(regex = $crate::ID_REGEX),
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                PartialOrd,
                Ord,
                Hash,
                Deref,
                TryFrom,
                Display,
                Serialize,
                Deserialize,
            ),
        )]
        pub struct $ident(String);

        impl ::core::convert::From<::uuid::Uuid> for $ident {
            fn from(id: ::uuid::Uuid) -> Self {
                // the uuid text form always matches the id shape
                Self::try_new(id.to_string()).unwrap()
            }
        }
    };
}

macro_rules! nutype_string {
    ($ident:ident(validate($($validate:tt)*))) => {
        #[::nutype::nutype(
            validate($($validate)*),
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                PartialOrd,
                Ord,
                Hash,
                Deref,
                TryFrom,
                Serialize,
                Deserialize,
            ),
        )]
        pub struct $ident(String);
    };
}

pub(crate) use id;
pub(crate) use nutype_string;
