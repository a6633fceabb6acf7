//! GLSL ES 3.00 sources for the metaball program.
//!
//! The vertex stage is fixed text. The fragment stage is a template: the
//! resolution and the source count must be compile-time constants in GLSL
//! (the count sizes the uniform array), so they are substituted into the
//! text before compilation. Rendering the template is pure string work and
//! is kept apart from compiling it.

use crate::config::MAX_SOURCES;
use crate::error::MetaballError;
use crate::field::{EDGE_BLEND_SCALE, SURFACE_THRESHOLD};
use crate::viewport::Viewport;

/// Passes the quad's 2D `position` attribute straight through to clip space.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 position;
void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

/// Fragment stage with `{{...}}` placeholders for its compile-time constants.
pub const FRAGMENT_TEMPLATE: &str = r#"#version 300 es
precision highp float;

const float WIDTH = {{WIDTH}};
const float HEIGHT = {{HEIGHT}};
const float THRESHOLD = {{THRESHOLD}};
const float EDGE_BLEND = {{EDGE_BLEND}};
#define NUM_METABALLS {{NUM_METABALLS}}

uniform vec3 metaballs[NUM_METABALLS];
out vec4 frag_color;

void main() {
    float x = gl_FragCoord.x;
    float y = gl_FragCoord.y;

    float sum = 0.0;
    for (int i = 0; i < NUM_METABALLS; i++) {
        vec3 metaball = metaballs[i];
        float dx = metaball.x - x;
        float dy = metaball.y - y;
        float radius = metaball.z;
        sum += (radius * radius) / (dx * dx + dy * dy);
    }

    if (sum >= THRESHOLD) {
        vec3 base = vec3(x / WIDTH, y / HEIGHT, 1.0);
        float edge = max(0.0, 1.0 - (sum - THRESHOLD) * EDGE_BLEND);
        frag_color = vec4(mix(base, vec3(0.0), edge), 1.0);
        return;
    }

    frag_color = vec4(0.0, 0.0, 0.0, 1.0);
}
"#;

/// Values baked into the fragment stage. Changing any of them means
/// rebuilding the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderConstants {
    viewport: Viewport,
    count: usize,
}

impl ShaderConstants {
    /// Returns `MetaballError::InvalidSourceCount` unless `1 <= count <= MAX_SOURCES`.
    pub fn new(viewport: Viewport, count: usize) -> Result<Self, MetaballError> {
        if count == 0 || count > MAX_SOURCES {
            return Err(MetaballError::InvalidSourceCount {
                count,
                max: MAX_SOURCES,
            });
        }
        Ok(Self { viewport, count })
    }

    /// Baked into `WIDTH` and `HEIGHT`.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Baked into `NUM_METABALLS`; the uniform array length.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The fragment source with every placeholder substituted.
    pub fn render_fragment(&self) -> String {
        FRAGMENT_TEMPLATE
            .replace("{{WIDTH}}", &glsl_float(self.viewport.width() as f32))
            .replace("{{HEIGHT}}", &glsl_float(self.viewport.height() as f32))
            .replace("{{THRESHOLD}}", &glsl_float(SURFACE_THRESHOLD))
            .replace("{{EDGE_BLEND}}", &glsl_float(EDGE_BLEND_SCALE))
            .replace("{{NUM_METABALLS}}", &self.count.to_string())
    }
}

/// Formats a float as a GLSL float literal.
///
/// `Debug` for `f32` always keeps a fractional part or exponent (`800.0`,
/// `0.99`, `1e20`), so the literal never parses as an `int`.
fn glsl_float(v: f32) -> String {
    format!("{v:?}")
}
