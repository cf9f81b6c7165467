use chrono::{
  DateTime,
  NaiveDateTime,
  SecondsFormat,
  Utc
};

/// Parses a timestamp as the backend emits it.
///
/// Accepts RFC 3339 with an offset, or a naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` which is taken as UTC.
pub fn parse_api_datetime(
  raw: &str
) -> Result<DateTime<Utc>, chrono::ParseError>
{
  let raw = raw.trim();
  match DateTime::parse_from_rfc3339(raw) {
    | Ok(dt) => Ok(dt.with_timezone(&Utc)),
    | Err(_) => {
      NaiveDateTime::parse_from_str(
        raw,
        "%Y-%m-%dT%H:%M:%S%.f"
      )
      .map(|naive| naive.and_utc())
    }
  }
}

#[must_use]
pub fn format_api_datetime(
  dt: &DateTime<Utc>
) -> String {
  dt.to_rfc3339_opts(
    SecondsFormat::Secs,
    true
  )
}

pub mod api_datetime_serde {
  use chrono::{
    DateTime,
    Utc
  };
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  pub fn serialize<S>(
    dt: &DateTime<Utc>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_str(
      &super::format_api_datetime(dt)
    )
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<DateTime<Utc>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = String::deserialize(
      deserializer
    )?;
    super::parse_api_datetime(&raw)
      .map_err(serde::de::Error::custom)
  }

  pub mod option {
    use chrono::{
      DateTime,
      Utc
    };
    use serde::{
      Deserialize,
      Deserializer,
      Serializer
    };

    pub fn serialize<S>(
      dt: &Option<DateTime<Utc>>,
      serializer: S
    ) -> Result<S::Ok, S::Error>
    where
      S: Serializer
    {
      match dt {
        | Some(value) => {
          serializer.serialize_str(
            &super::super::format_api_datetime(
              value
            )
          )
        }
        | None => serializer.serialize_none()
      }
    }

    pub fn deserialize<'de, D>(
      deserializer: D
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
      D: Deserializer<'de>
    {
      let raw = Option::<String>::deserialize(
        deserializer
      )?;
      match raw {
        | Some(value)
          if !value.trim().is_empty() =>
        {
          super::super::parse_api_datetime(
            &value
          )
          .map(Some)
          .map_err(serde::de::Error::custom)
        }
        | _ => Ok(None)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::{
    format_api_datetime,
    parse_api_datetime
  };

  #[test]
  fn parses_naive_backend_timestamp_as_utc()
  {
    let parsed = parse_api_datetime(
      "2026-10-17T09:30:00"
    )
    .expect("naive timestamp");
    assert_eq!(
      parsed,
      Utc
        .with_ymd_and_hms(
          2026, 10, 17, 9, 30, 0
        )
        .single()
        .expect("valid datetime")
    );
  }

  #[test]
  fn parses_fractional_seconds_and_offsets()
  {
    let fractional = parse_api_datetime(
      "2026-10-17T09:30:00.123456"
    )
    .expect("fractional timestamp");
    assert_eq!(
      fractional.timestamp(),
      Utc
        .with_ymd_and_hms(
          2026, 10, 17, 9, 30, 0
        )
        .single()
        .expect("valid datetime")
        .timestamp()
    );

    let offset = parse_api_datetime(
      "2026-10-17T18:30:00+09:00"
    )
    .expect("offset timestamp");
    assert_eq!(
      format_api_datetime(&offset),
      "2026-10-17T09:30:00Z"
    );
  }

  #[test]
  fn rejects_garbage() {
    assert!(
      parse_api_datetime("next week")
        .is_err()
    );
  }
}
