//! Account roles.
//!
//! An account is either a consumer, who browses listings, or an organizer,
//! who publishes them. The role is fixed when the account is created and is
//! copied into every session token issued for it.
//!
//! On the wire and in the database the consumer role is spelled `"user"`;
//! `"consumer"` is accepted as input too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Postgres, Type,
    postgres::PgTypeInfo,
};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[default]
    #[serde(rename = "user", alias = "consumer")]
    Consumer,
    #[serde(rename = "organizer")]
    Organizer,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role `{0}`")]
pub struct ParseRoleError(pub String);

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => "user",
            Role::Organizer => "organizer",
        }
    }

    pub const fn is_organizer(&self) -> bool {
        matches!(self, Role::Organizer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "consumer" => Ok(Role::Consumer),
            "organizer" => Ok(Role::Organizer),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

impl Type<Postgres> for Role {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(
        value: <Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(s.parse::<Role>()?)
    }
}

impl<'q> Encode<'q, Postgres> for Role {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumer_serializes_as_user() {
        assert_eq!(serde_json::to_string(&Role::Consumer).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Organizer).unwrap(), r#""organizer""#);
    }

    #[test]
    fn test_consumer_alias_accepted() {
        let a: Role = serde_json::from_str(r#""user""#).unwrap();
        let b: Role = serde_json::from_str(r#""consumer""#).unwrap();
        assert_eq!(a, Role::Consumer);
        assert_eq!(b, Role::Consumer);
        assert!(serde_json::from_str::<Role>(r#""admin""#).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("organizer".parse::<Role>().unwrap(), Role::Organizer);
        assert_eq!("consumer".parse::<Role>().unwrap(), Role::Consumer);
        assert_eq!(
            "Organizer".parse::<Role>().unwrap_err(),
            ParseRoleError("Organizer".to_string())
        );
    }

    #[test]
    fn test_display_matches_wire_value() {
        assert_eq!(Role::Consumer.to_string(), "user");
        assert!(Role::Organizer.is_organizer());
        assert!(!Role::default().is_organizer());
    }
}
