use crate::cursor::LineCursor;
use crate::errors::IesResult;
use crate::parser_config::ParserConfig;
use bytes::BytesMut;

pub trait IesParser {
    fn from_cursor(cursor: &mut LineCursor, config: &ParserConfig) -> IesResult<Self>
    where
        Self: Sized;
}

pub trait IesWriter {
    fn to_bytes(&self, buffer: &mut BytesMut) -> IesResult<()>;
}
