//! JSON-lines render target
//!
//! Writes one JSON object per line for every program load and uniform
//! write, so a separate viewer process can drive the actual shader canvas.

use crate::render::target::{RenderResult, RenderTarget, UniformValue};
use serde::Serialize;
use std::io::Write;
use std::time::Instant;

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
enum StreamRecord<'a> {
    #[serde(rename_all = "camelCase")]
    Load { target: &'a str, program: &'a str },
    #[serde(rename_all = "camelCase")]
    Uniform {
        target: &'a str,
        name: &'a str,
        value: &'a [f32],
        clock: f64,
    },
}

pub struct JsonLinesTarget<W: Write + Send> {
    name: String,
    writer: W,
    started: Instant,
}

impl<W: Write + Send> JsonLinesTarget<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer,
            started: Instant::now(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, record: &StreamRecord<'_>) -> RenderResult<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> RenderTarget for JsonLinesTarget<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self, program: &str) -> RenderResult<()> {
        let name = self.name.clone();
        self.emit(&StreamRecord::Load {
            target: &name,
            program,
        })
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> RenderResult<()> {
        let target = self.name.clone();
        let clock = self.clock();
        self.emit(&StreamRecord::Uniform {
            target: &target,
            name,
            value: value.components(),
            clock,
        })
    }

    fn clock(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(target: JsonLinesTarget<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = target.into_inner();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_uniform_record_shape() {
        let mut target = JsonLinesTarget::new("stdout", Vec::new());
        target
            .set_uniform("iCurrentCursor", UniformValue::Vec4([1.0, 2.0, 20.0, 40.0]))
            .unwrap();

        let records = lines(target);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["event"], "uniform");
        assert_eq!(records[0]["target"], "stdout");
        assert_eq!(records[0]["name"], "iCurrentCursor");
        assert_eq!(records[0]["value"], serde_json::json!([1.0, 2.0, 20.0, 40.0]));
        assert!(records[0]["clock"].as_f64().unwrap() >= 0.0);
    }

    #[test]
    fn test_one_line_per_call() {
        let mut target = JsonLinesTarget::new("stdout", Vec::new());
        target.load("void main() {}").unwrap();
        target
            .set_uniform("iTimeCursorChange", UniformValue::Float(0.5))
            .unwrap();

        let records = lines(target);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["event"], "load");
        assert_eq!(records[0]["program"], "void main() {}");
        assert_eq!(records[1]["value"], serde_json::json!([0.5]));
    }
}
