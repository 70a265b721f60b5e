use core::fmt;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use log::trace;

use crate::sniff::SniffError;

// -----------------------------------------------------------------------------
// WireFormat

/// The wire formats told apart by [`FormatSniffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// The binary format, standard or referencing.
    Binary,
    /// The JSON-like text format.
    Json,
    /// [`Json`](Self::Json) behind a UTF-8 byte order mark.
    JsonBom,
    /// The XML-like text format.
    Xml,
    /// [`Xml`](Self::Xml) behind a UTF-8 byte order mark.
    XmlBom,
    Unknown,
}

impl WireFormat {
    /// Returns the format with the byte order mark removed.
    #[inline]
    pub const fn without_bom(self) -> Self {
        match self {
            Self::JsonBom => Self::Json,
            Self::XmlBom => Self::Xml,
            other => other,
        }
    }

    #[inline]
    pub const fn has_bom(self) -> bool {
        matches!(self, Self::JsonBom | Self::XmlBom)
    }

    /// Number of leading bytes a reader must skip.
    #[inline]
    pub const fn bom_len(self) -> usize {
        if self.has_bom() { UTF8_BOM.len() } else { 0 }
    }

    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Binary => "binary",
            Self::Json => "json",
            Self::JsonBom => "json (bom)",
            Self::Xml => "xml",
            Self::XmlBom => "xml (bom)",
            Self::Unknown => "unknown",
        })
    }
}

// -----------------------------------------------------------------------------
// FormatSniffer

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Leading bytes of the standard and the referencing binary format.
const BINARY_MAGIC: [[u8; 2]; 2] = [[0x92, 0x01], [0x92, 0x02]];

/// Detects the wire format from the first bytes of a document.
///
/// # Examples
///
/// ```
/// use bw_wire::sniff::{FormatSniffer, WireFormat};
///
/// assert_eq!(FormatSniffer::sniff(br#"{"a":1}"#), WireFormat::Json);
/// assert_eq!(FormatSniffer::sniff(b"<bean></bean>"), WireFormat::Xml);
/// assert_eq!(FormatSniffer::sniff(b"\xEF\xBB\xBF{}"), WireFormat::JsonBom);
/// assert_eq!(FormatSniffer::sniff(&[0x92, 0x02, 0x00]), WireFormat::Binary);
/// assert_eq!(FormatSniffer::sniff(b"{"), WireFormat::Unknown);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatSniffer;

impl FormatSniffer {
    /// Number of bytes inspected at most.
    pub const SNIFF_LEN: usize = 128;

    /// Detects the format of a byte prefix, only the first
    /// [`SNIFF_LEN`](Self::SNIFF_LEN) bytes are looked at.
    pub fn sniff(bytes: &[u8]) -> WireFormat {
        let bytes = &bytes[..bytes.len().min(Self::SNIFF_LEN)];
        if bytes.len() < 2 {
            return WireFormat::Unknown;
        }

        if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
            return if rest.first() == Some(&b'<') {
                if is_xml(rest) { WireFormat::XmlBom } else { WireFormat::Unknown }
            } else if is_json(rest) {
                WireFormat::JsonBom
            } else {
                WireFormat::Unknown
            };
        }
        if is_xml(bytes) {
            return WireFormat::Xml;
        }
        if is_json(bytes) {
            return WireFormat::Json;
        }
        if BINARY_MAGIC.iter().any(|magic| bytes.starts_with(magic)) {
            return WireFormat::Binary;
        }
        WireFormat::Unknown
    }

    /// Detects the format of a stream and rewinds it to where it started.
    ///
    /// # Errors
    ///
    /// [`SniffError::Io`] if the prefix cannot be read,
    /// [`SniffError::Rewind`] if the stream cannot seek back.
    pub fn sniff_stream<R: Read + Seek + ?Sized>(reader: &mut R) -> Result<WireFormat, SniffError> {
        let start = reader.stream_position().map_err(SniffError::Rewind)?;

        let mut prefix = [0_u8; Self::SNIFF_LEN];
        let mut filled = 0;
        let read = loop {
            if filled == prefix.len() {
                break Ok(());
            }
            match reader.read(&mut prefix[filled..]) {
                Ok(0) => break Ok(()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => break Err(e),
            }
        };

        // Rewind even when the read failed, the caller may retry.
        reader
            .seek(SeekFrom::Start(start))
            .map_err(SniffError::Rewind)?;
        read?;

        let format = Self::sniff(&prefix[..filled]);
        trace!("sniffed {format} from {filled} bytes");
        Ok(format)
    }
}

fn is_xml(bytes: &[u8]) -> bool {
    bytes.first() == Some(&b'<') && (contains(bytes, b"<bean ") || contains(bytes, b"<bean>"))
}

fn is_json(bytes: &[u8]) -> bool {
    let Some((b'{', rest)) = bytes.split_first() else {
        return false;
    };
    matches!(
        rest.iter().find(|byte| !byte.is_ascii_whitespace()),
        Some(b'}' | b'"')
    )
}

#[inline]
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use std::io::{self, Cursor, Read, Seek, SeekFrom};

    use super::{FormatSniffer, WireFormat};
    use crate::sniff::SniffError;

    fn check(bytes: &[u8], expected: WireFormat) {
        assert_eq!(FormatSniffer::sniff(bytes), expected, "{bytes:?}");
    }

    #[test]
    fn scenarios() {
        check(br#"{"a":1}"#, WireFormat::Json);
        check(b"{ \n\t}", WireFormat::Json);
        check(b"{ 1 }", WireFormat::Unknown);
        check(b"<bean></bean>", WireFormat::Xml);
        check(b"<bean type=\"Person\">", WireFormat::Xml);
        check(b"<?xml version=\"1.0\"?>\n<bean>", WireFormat::Xml);
        check(b"<beans>", WireFormat::Unknown);
        check(b"\xEF\xBB\xBF{}", WireFormat::JsonBom);
        check(b"\xEF\xBB\xBF<bean>", WireFormat::XmlBom);
        check(b"\xEF\xBB\xBF<html>", WireFormat::Unknown);
        check(b"\xEF\xBB\xBFabc", WireFormat::Unknown);
        check(b"{", WireFormat::Unknown);
        check(b"", WireFormat::Unknown);
        check(&[0x92, 0x01], WireFormat::Binary);
        check(&[0x92, 0x02, 0xFF], WireFormat::Binary);
        check(&[0x92, 0x03], WireFormat::Unknown);
    }

    #[test]
    fn only_the_prefix_counts() {
        let mut bytes = Vec::from(&b"<"[..]);
        bytes.extend(core::iter::repeat_n(b' ', 200));
        bytes.extend_from_slice(b"<bean>");
        assert_eq!(FormatSniffer::sniff(&bytes), WireFormat::Unknown);
    }

    #[test]
    fn stream_is_rewound() {
        let mut stream = Cursor::new(b"xx{\"a\":1}".to_vec());
        stream.seek(SeekFrom::Start(2)).unwrap();
        assert_eq!(FormatSniffer::sniff_stream(&mut stream).unwrap(), WireFormat::Json);
        assert_eq!(stream.position(), 2);

        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"{\"a\":1}");
    }

    struct NoRewind(Cursor<Vec<u8>>);

    impl Read for NoRewind {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl Seek for NoRewind {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            match pos {
                SeekFrom::Current(0) => self.0.seek(pos),
                _ => Err(io::Error::new(io::ErrorKind::Unsupported, "forward only")),
            }
        }
    }

    #[test]
    fn rewind_failure_is_an_error() {
        let mut stream = NoRewind(Cursor::new(b"{}".to_vec()));
        assert!(matches!(
            FormatSniffer::sniff_stream(&mut stream),
            Err(SniffError::Rewind(_))
        ));
    }
}
