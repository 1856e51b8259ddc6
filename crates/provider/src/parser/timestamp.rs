/// .NET binary date-time codec.
///
/// The wire field `t` carries the value of .NET `DateTime.ToBinary()`: a
/// 64-bit integer whose low 62 bits are ticks (100 ns units since
/// 0001-01-01T00:00:00) and whose top 2 bits are kind flags (Unspecified,
/// UTC, Local). Decoding masks the kind bits and interprets the ticks as a
/// UTC instant. For Local-kind values the serializer already stored
/// UTC-adjusted ticks, so the instant survives; the deserializer-side
/// local-zone re-adjustment is host-dependent and is not reproduced.

use chrono::{DateTime, Utc};

/// Low 62 bits of a binary date-time: the tick count.
const TICKS_MASK: i64 = 0x3FFF_FFFF_FFFF_FFFF;
/// Kind flag marking a UTC instant (bit 62).
const KIND_UTC: i64 = 0x4000_0000_0000_0000;
/// 100 ns ticks per second.
const TICKS_PER_SECOND: i64 = 10_000_000;
/// Ticks between 0001-01-01T00:00:00 and the Unix epoch.
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Decode a binary date-time value into a UTC instant.
///
/// Total: the masked tick count spans year 1 through roughly year 14,600,
/// all of it inside chrono's representable range.
pub fn from_binary(value: i64) -> DateTime<Utc> {
    let ticks = value & TICKS_MASK;
    let rel = ticks - UNIX_EPOCH_TICKS;
    let secs = rel.div_euclid(TICKS_PER_SECOND);
    let nanos = (rel.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::from_timestamp(secs, nanos).unwrap_or_default()
}

/// Encode a UTC instant as a binary date-time value with the UTC kind flag.
///
/// Sub-tick precision (below 100 ns) is truncated, exactly as the producer
/// truncates it.
pub fn to_binary(instant: DateTime<Utc>) -> i64 {
    let secs = instant.timestamp();
    let sub_ticks = (instant.timestamp_subsec_nanos() / 100) as i64;
    let ticks = UNIX_EPOCH_TICKS + secs * TICKS_PER_SECOND + sub_ticks;
    ticks | KIND_UTC
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn round_trip_known_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap();
        assert_eq!(from_binary(to_binary(instant)), instant);
    }

    #[test]
    fn round_trip_preserves_subsecond_ticks() {
        let instant = Utc
            .with_ymd_and_hms(2024, 6, 1, 10, 30, 0)
            .unwrap()
            .checked_add_signed(chrono::Duration::nanoseconds(123_456_700))
            .unwrap();
        assert_eq!(from_binary(to_binary(instant)), instant);
    }

    #[test]
    fn utc_kind_flag_is_masked() {
        let instant = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let raw_ticks = to_binary(instant) & TICKS_MASK;
        // The same ticks with and without the kind flag decode identically
        assert_eq!(from_binary(raw_ticks), from_binary(raw_ticks | KIND_UTC));
    }

    #[test]
    fn local_kind_sign_bit_is_masked() {
        let instant = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let raw_ticks = to_binary(instant) & TICKS_MASK;
        // Local-kind values carry bit 63; the ticks still decode to the
        // same instant
        assert_eq!(from_binary(raw_ticks | i64::MIN), instant);
    }

    #[test]
    fn zero_value_is_year_one() {
        let dt = from_binary(0);
        assert_eq!(dt.timestamp(), -UNIX_EPOCH_TICKS / TICKS_PER_SECOND);
    }

    #[test]
    fn max_tick_count_stays_representable() {
        // The full 62-bit range decodes without saturating to the default
        let dt = from_binary(TICKS_MASK);
        assert!(dt.timestamp() > 0);
        assert_eq!(to_binary(dt), TICKS_MASK | KIND_UTC);
    }

    #[test]
    fn binary_round_trip_from_wire_value() {
        // Encoding a decoded UTC wire value reproduces it bit-for-bit
        let wire = to_binary(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap());
        assert_eq!(to_binary(from_binary(wire)), wire);
    }
}
