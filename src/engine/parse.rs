use swc_common::{BytePos, FileName, SourceFile, SourceMap, Span, sync::Lrc};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::error::MigrateError;

/// A parsed TypeScript program together with its original text.
///
/// The engine works off spans: every fragment it carries into the output is
/// sliced verbatim out of `source`, never re-printed from the AST.
#[derive(Debug)]
pub struct ParsedScript {
    pub module: Module,
    source: String,
    source_file: Lrc<SourceFile>,
}

/// Parse a TypeScript source string (decorators enabled) into an AST.
pub fn parse_script(code: &str, file_path: &str) -> Result<ParsedScript, MigrateError> {
    let source_map = SourceMap::default();
    let source_file =
        source_map.new_source_file(FileName::Real(file_path.into()).into(), code.to_string());

    let syntax = Syntax::Typescript(TsSyntax {
        decorators: true,
        ..Default::default()
    });
    let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
    let module = parser
        .parse_module()
        .map_err(|e| MigrateError::Parse(format!("{:?}", e)))?;

    Ok(ParsedScript {
        module,
        source: code.to_string(),
        source_file,
    })
}

impl ParsedScript {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset of a position within the original text.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.source_file.start_pos.0) as usize
    }

    /// The verbatim text covered by a span.
    pub fn snippet(&self, span: Span) -> &str {
        self.slice(span.lo, span.hi)
    }

    pub fn slice(&self, lo: BytePos, hi: BytePos) -> &str {
        &self.source[self.offset(lo)..self.offset(hi)]
    }
}
