//! SVG container around an embedded PNG.
//!
//! The output is an ordinary raster wrapped in an `<image>` element; no
//! tracing or path generation takes place.

use base64::{Engine, engine::general_purpose::STANDARD};
use quick_xml::escape::escape;

/// An SVG document embedding one PNG as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub description: String,
    /// Base64 of the PNG bytes.
    pub payload: String,
}

impl SvgDocument {
    /// Wrap `png` (already encoded) with the given declared size.
    pub fn from_png(
        png: &[u8],
        width: u32,
        height: u32,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            description: description.into(),
            payload: STANDARD.encode(png),
        }
    }

    /// Render the full document text.
    pub fn render(&self) -> String {
        let Self {
            width: w,
            height: h,
            payload,
            ..
        } = self;
        let title = escape(self.title.as_str());
        let desc = escape(self.description.as_str());

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}"
     xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
  <title>{title}</title>
  <desc>{desc}</desc>

  <!-- Embedded PNG raster -->
  <image x="0" y="0" width="{w}" height="{h}"
         xlink:href="data:image/png;base64,{payload}" />
</svg>
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::{Reader, events::Event};

    fn sample() -> SvgDocument {
        SvgDocument::from_png(b"\x89PNG-ish", 512, 384, "AI & Robotics <Academy> - Icon", "desc")
    }

    #[test]
    fn test_render_is_well_formed_xml() {
        let svg = sample().render();
        let mut reader = Reader::from_str(&svg);
        let mut elements = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Start(e) | Event::Empty(e)) => {
                    elements.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                Ok(_) => {}
                Err(e) => panic!("invalid xml: {e}"),
            }
        }
        assert_eq!(elements, ["svg", "title", "desc", "image"]);
    }

    #[test]
    fn test_render_declares_size_and_viewbox() {
        let svg = sample().render();
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"<svg width="512" height="384" viewBox="0 0 512 384""#));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.contains(r#"<image x="0" y="0" width="512" height="384""#));
    }

    #[test]
    fn test_render_escapes_metadata() {
        let svg = sample().render();
        assert!(svg.contains("<title>AI &amp; Robotics &lt;Academy&gt; - Icon</title>"));
    }

    #[test]
    fn test_payload_is_base64_of_png() {
        let doc = sample();
        assert_eq!(STANDARD.decode(&doc.payload).unwrap(), b"\x89PNG-ish");
        assert!(
            doc.render()
                .contains(&format!("data:image/png;base64,{}", doc.payload))
        );
    }
}
