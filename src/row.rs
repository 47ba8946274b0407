//! Fixed-schema row and its fixed-width binary codec.
//!
//! A serialized row is exactly [`ROW_SIZE`] (293) bytes: a little-endian
//! `u32` id, then the username and email as NUL-padded fixed-width fields.
//! Each text field keeps at least one terminator byte after the payload, so
//! a 32-byte username occupies the full 32 payload bytes plus its
//! terminator.

use crate::error::{DbError, Result};
use crate::types::{
    EMAIL_MAX, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_MAX,
    USERNAME_OFFSET, USERNAME_SIZE,
};
use std::fmt;

/// One row of the single fixed-schema table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Row identifier, doubles as the B-tree key
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    /// Build a row, validating field widths.
    ///
    /// Fails with `FieldTooLong` if `username` exceeds 32 bytes or `email`
    /// exceeds 255 bytes. Lengths are measured in bytes, not characters.
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let email = email.into();

        if username.len() > USERNAME_MAX {
            return Err(DbError::FieldTooLong {
                field: "username",
                size: username.len(),
                max: USERNAME_MAX,
            });
        }
        if email.len() > EMAIL_MAX {
            return Err(DbError::FieldTooLong {
                field: "email",
                size: email.len(),
                max: EMAIL_MAX,
            });
        }

        Ok(Self {
            id,
            username,
            email,
        })
    }

    /// Serialize into a 293-byte destination buffer.
    ///
    /// The destination must be exactly [`ROW_SIZE`] bytes. Unused field
    /// bytes are zeroed so the record is deterministic.
    pub fn serialize(&self, dest: &mut [u8]) {
        debug_assert_eq!(dest.len(), ROW_SIZE);

        dest.fill(0);
        dest[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        dest[USERNAME_OFFSET..USERNAME_OFFSET + self.username.len()]
            .copy_from_slice(self.username.as_bytes());
        dest[EMAIL_OFFSET..EMAIL_OFFSET + self.email.len()].copy_from_slice(self.email.as_bytes());
    }

    /// Deserialize from a 293-byte source buffer.
    ///
    /// Total over any buffer this codec produced. Text fields are read up
    /// to their first NUL byte.
    pub fn deserialize(src: &[u8]) -> Self {
        debug_assert_eq!(src.len(), ROW_SIZE);

        let id = u32::from_le_bytes(
            src[ID_OFFSET..ID_OFFSET + ID_SIZE]
                .try_into()
                .expect("row id slice is 4 bytes"),
        );
        let username = read_padded_field(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        let email = read_padded_field(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);

        Self {
            id,
            username,
            email,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.id, self.username, self.email)
    }
}

/// Read a NUL-padded fixed-width text field
fn read_padded_field(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let row = Row::new(1, "username", "email@email.com").unwrap();
        let mut buf = [0u8; ROW_SIZE];
        row.serialize(&mut buf);

        assert_eq!(Row::deserialize(&buf), row);
    }

    #[test]
    fn test_id_is_little_endian() {
        let row = Row::new(0x01020304, "u", "e").unwrap();
        let mut buf = [0u8; ROW_SIZE];
        row.serialize(&mut buf);

        assert_eq!(&buf[..4], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_max_length_fields_accepted() {
        let username = "a".repeat(32);
        let email = "b".repeat(255);
        let row = Row::new(1, username.clone(), email.clone()).unwrap();

        let mut buf = [0u8; ROW_SIZE];
        row.serialize(&mut buf);
        let restored = Row::deserialize(&buf);
        assert_eq!(restored.username, username);
        assert_eq!(restored.email, email);
    }

    #[test]
    fn test_over_length_fields_rejected() {
        let err = Row::new(1, "a".repeat(33), "b").unwrap_err();
        assert!(matches!(
            err,
            DbError::FieldTooLong {
                field: "username",
                size: 33,
                max: 32
            }
        ));

        let err = Row::new(1, "a", "b".repeat(256)).unwrap_err();
        assert!(matches!(
            err,
            DbError::FieldTooLong {
                field: "email",
                size: 256,
                max: 255
            }
        ));
    }

    #[test]
    fn test_display_format() {
        let row = Row::new(1, "username", "email@email.com").unwrap();
        assert_eq!(row.to_string(), "[1, username, email@email.com]");
    }

    #[test]
    fn test_empty_fields_round_trip() {
        let row = Row::new(0, "", "").unwrap();
        let mut buf = [0u8; ROW_SIZE];
        row.serialize(&mut buf);

        let restored = Row::deserialize(&buf);
        assert_eq!(restored.id, 0);
        assert_eq!(restored.username, "");
        assert_eq!(restored.email, "");
    }
}
