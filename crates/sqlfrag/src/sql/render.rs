use super::part::QueryPart;
use super::segment::Segment;
use crate::config::RenderConfig;
use crate::error::{FragError, FragResult};
use crate::value::SqlValue;

/// The output of rendering: SQL text with `$N` placeholders and the values
/// bound to them, `values[i]` belonging to `$<i + 1>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSql {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl RenderedSql {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.values)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}

/// Turns a [`QueryPart`] into [`RenderedSql`].
///
/// Rendering walks the segments once: literal text is copied verbatim and every
/// value emits the next `$N` (starting at `$1`) while its value is pushed onto
/// the parameter list. The fragment is only read.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, part: &QueryPart) -> RenderedSql {
        let mut values = Vec::new();
        let sql = emit(part, Some(&mut values));
        self.trace(&sql, values.len());
        RenderedSql { sql, values }
    }

    /// Render only the SQL text.
    pub fn render_sql(&self, part: &QueryPart) -> String {
        emit(part, None)
    }

    /// Reject fragments binding more values than `max_params`.
    pub fn validate(&self, part: &QueryPart) -> FragResult<()> {
        let count = part.param_count();
        if count > self.config.max_params {
            let max = self.config.max_params;
            return Err(FragError::Validation(format!(
                "QueryPart: params({count}) > max_params({max})"
            )));
        }
        Ok(())
    }

    #[cfg(feature = "tracing")]
    fn trace(&self, sql: &str, param_count: usize) {
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    tracing::Level::ERROR => tracing::error!($($field)*),
                    tracing::Level::WARN => tracing::warn!($($field)*),
                    tracing::Level::INFO => tracing::info!($($field)*),
                    tracing::Level::DEBUG => tracing::debug!($($field)*),
                    tracing::Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        if !self.config.log_sql {
            return;
        }
        let sql = match self.config.max_sql_length {
            Some(max) => truncate_chars(sql, max),
            None => std::borrow::Cow::Borrowed(sql),
        };
        emit_at_level!(
            tracing::Level::from(self.config.log_level),
            target: "sqlfrag.render",
            param_count,
            sql = %sql,
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn trace(&self, _sql: &str, _param_count: usize) {}
}

// Single walk over the segments: literals are copied, each value emits the
// next `$N` and, when `values` is given, is pushed in the same step.
fn emit(part: &QueryPart, mut values: Option<&mut Vec<SqlValue>>) -> String {
    let mut out = String::new();
    let mut idx: usize = 0;
    for segment in part.segments() {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Value(v) => {
                idx += 1;
                out.push('$');
                push_usize(&mut out, idx);
                if let Some(values) = values.as_deref_mut() {
                    values.push(v.clone());
                }
            }
        }
    }
    out
}

// Write a usize as decimal digits without going through fmt.
#[inline]
fn push_usize(out: &mut String, mut n: usize) {
    let mut buf = [0u8; 20];
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    out.extend(buf[pos..].iter().map(|&b| char::from(b)));
}

#[cfg(feature = "tracing")]
fn truncate_chars(sql: &str, max: usize) -> std::borrow::Cow<'_, str> {
    match sql.char_indices().nth(max) {
        Some((end, _)) => std::borrow::Cow::Owned(format!("{}...", &sql[..end])),
        None => std::borrow::Cow::Borrowed(sql),
    }
}
