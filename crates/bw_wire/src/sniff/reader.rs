use alloc::sync::Arc;
use core::fmt;
use std::io::{Read, Seek, SeekFrom};

use crate::Value;
use crate::info::TypeDescriptor;
use crate::sniff::{FormatSniffer, ReadError, SniffError, WireFormat};

// -----------------------------------------------------------------------------
// FormatReader

/// A reader of one wire format.
///
/// The input starts at the first byte of the document, after any byte
/// order mark. Closures of the matching signature are readers.
pub trait FormatReader: Send + Sync {
    fn read(&self, input: &mut dyn Read, root: &TypeDescriptor) -> Result<Value, ReadError>;
}

impl<F> FormatReader for F
where
    F: Fn(&mut dyn Read, &TypeDescriptor) -> Result<Value, ReadError> + Send + Sync,
{
    #[inline]
    fn read(&self, input: &mut dyn Read, root: &TypeDescriptor) -> Result<Value, ReadError> {
        self(input, root)
    }
}

// -----------------------------------------------------------------------------
// SmartReader

/// Reads a document in whichever wire format it was written.
///
/// # Examples
///
/// ```
/// use std::io::Read;
///
/// use bw_wire::Value;
/// use bw_wire::info::TypeDescriptor;
/// use bw_wire::sniff::{ReadError, SmartReader};
///
/// let reader = SmartReader::new().with_json(
///     |input: &mut dyn Read, _: &TypeDescriptor| -> Result<Value, ReadError> {
///         let mut text = String::new();
///         input.read_to_string(&mut text)?;
///         Ok(Value::from(text))
///     },
/// );
///
/// let value = reader.read(b"\xEF\xBB\xBF{}", &TypeDescriptor::any()).unwrap();
/// assert_eq!(value, Value::from("{}"));
/// assert!(reader.read(b"<bean></bean>", &TypeDescriptor::any()).is_err());
/// ```
#[derive(Clone, Default)]
pub struct SmartReader {
    binary: Option<Arc<dyn FormatReader>>,
    json: Option<Arc<dyn FormatReader>>,
    xml: Option<Arc<dyn FormatReader>>,
}

impl SmartReader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(mut self, reader: impl FormatReader + 'static) -> Self {
        self.binary = Some(Arc::new(reader));
        self
    }

    /// Sets the reader of the JSON-like format, with or without BOM.
    pub fn with_json(mut self, reader: impl FormatReader + 'static) -> Self {
        self.json = Some(Arc::new(reader));
        self
    }

    /// Sets the reader of the XML-like format, with or without BOM.
    pub fn with_xml(mut self, reader: impl FormatReader + 'static) -> Self {
        self.xml = Some(Arc::new(reader));
        self
    }

    /// Returns the reader configured for a format.
    pub fn reader_for(&self, format: WireFormat) -> Option<&Arc<dyn FormatReader>> {
        match format.without_bom() {
            WireFormat::Binary => self.binary.as_ref(),
            WireFormat::Json => self.json.as_ref(),
            WireFormat::Xml => self.xml.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if the bytes start a document in a known format.
    #[inline]
    pub fn is_known_format(bytes: &[u8]) -> bool {
        FormatSniffer::sniff(bytes).is_known()
    }

    fn select(&self, format: WireFormat) -> Result<&Arc<dyn FormatReader>, SniffError> {
        if !format.is_known() {
            return Err(SniffError::Unrecognized);
        }
        self.reader_for(format)
            .ok_or(SniffError::NoReader { format })
    }

    /// Reads a whole document held in memory.
    pub fn read(&self, bytes: &[u8], root: &TypeDescriptor) -> Result<Value, SniffError> {
        let format = FormatSniffer::sniff(bytes);
        let reader = self.select(format)?;
        let mut input = bytes.get(format.bom_len()..).unwrap_or_default();
        reader
            .read(&mut input, root)
            .map_err(|source| SniffError::Read { format, source })
    }

    /// Reads a document from a seekable stream.
    pub fn read_stream<R: Read + Seek>(
        &self,
        stream: &mut R,
        root: &TypeDescriptor,
    ) -> Result<Value, SniffError> {
        let format = FormatSniffer::sniff_stream(stream)?;
        let reader = self.select(format)?;
        if format.has_bom() {
            stream.seek(SeekFrom::Current(format.bom_len() as i64))?;
        }
        reader
            .read(stream, root)
            .map_err(|source| SniffError::Read { format, source })
    }
}

impl fmt::Debug for SmartReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartReader")
            .field("binary", &self.binary.is_some())
            .field("json", &self.json.is_some())
            .field("xml", &self.xml.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::io::{Cursor, Read};

    use super::SmartReader;
    use crate::Value;
    use crate::info::TypeDescriptor;
    use crate::sniff::{ReadError, SniffError, WireFormat};

    fn echo(input: &mut dyn Read, _: &TypeDescriptor) -> Result<Value, ReadError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        Ok(Value::from(text))
    }

    fn byte_count(input: &mut dyn Read, _: &TypeDescriptor) -> Result<Value, ReadError> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        Ok(Value::from(bytes.len() as u64))
    }

    #[test]
    fn dispatch() {
        let reader = SmartReader::new()
            .with_json(echo)
            .with_xml(echo)
            .with_binary(byte_count);
        let any = TypeDescriptor::any();

        assert_eq!(reader.read(br#"{"a":1}"#, &any).unwrap(), Value::from(r#"{"a":1}"#));
        assert_eq!(
            reader.read(b"\xEF\xBB\xBF<bean/><bean>", &any).unwrap(),
            Value::from("<bean/><bean>")
        );
        assert_eq!(reader.read(&[0x92, 0x01, 0x00], &any).unwrap(), Value::from(3_u64));
        assert!(matches!(reader.read(b"hello", &any), Err(SniffError::Unrecognized)));
    }

    #[test]
    fn missing_reader() {
        let reader = SmartReader::new().with_json(echo);
        assert!(matches!(
            reader.read(b"<bean>", &TypeDescriptor::any()),
            Err(SniffError::NoReader {
                format: WireFormat::Xml
            })
        ));
    }

    #[test]
    fn stream_strips_bom() {
        let reader = SmartReader::new().with_json(echo);
        let mut stream = Cursor::new(b"\xEF\xBB\xBF{\"b\":2}".to_vec());
        let value = reader.read_stream(&mut stream, &TypeDescriptor::any()).unwrap();
        assert_eq!(value, Value::from("{\"b\":2}"));
    }

    #[test]
    fn reader_errors_are_wrapped() {
        let reader = SmartReader::new().with_json(
            |_: &mut dyn Read, _: &TypeDescriptor| -> Result<Value, ReadError> {
                Err("broken".into())
            },
        );
        let error = reader.read(b"{}", &TypeDescriptor::any()).unwrap_err();
        assert!(matches!(error, SniffError::Read { format: WireFormat::Json, .. }));
    }
}
