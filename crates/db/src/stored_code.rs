//! `bytea` column type that holds zstd-compressed snippet code.
//!
//! Compression happens when the value is bound and decompression when the
//! column is decoded, so repositories bind and select plain text. A corrupt
//! blob surfaces as `sqlx::Error::ColumnDecode`, never as an empty string.

use codelet_core::compression::{compress_code, decompress_code};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type};

/// Snippet code in its decompressed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCode(pub String);

impl From<StoredCode> for String {
    fn from(code: StoredCode) -> Self {
        code.0
    }
}

impl Type<Postgres> for StoredCode {
    fn type_info() -> PgTypeInfo {
        <Vec<u8> as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <Vec<u8> as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for StoredCode {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        let compressed = compress_code(&self.0)?;
        <Vec<u8> as Encode<Postgres>>::encode(compressed, buf)
    }
}

impl<'r> Decode<'r, Postgres> for StoredCode {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let compressed = <&[u8] as Decode<Postgres>>::decode(value)?;
        Ok(Self(decompress_code(compressed)?))
    }
}
