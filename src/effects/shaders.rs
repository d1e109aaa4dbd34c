//! GLSL sources for the shipped effects.
//!
//! All sources are GLSL ES 1.00, which WebGL2 still accepts; the reflection
//! path does not care about the dialect. The gradient fragment source is
//! generated per point count because the shader loops over a fixed-size
//! array — buffering a larger array than the driven point count leaves
//! zeroed points that read as a dark spot in the middle of the gradient.

/// Sampler name convention of the final present stage.
pub const PRESENT_TEXTURE_UNIFORM: &str = "u_texture";

/// Vertex stage for passes that only need clip-space positions.
pub const QUAD_VERTEX_SHADER: &str = r#"
attribute vec2 aVertexPosition;
void main() {
    gl_Position = vec4(aVertexPosition, 0.0, 1.0);
}
"#;

/// Vertex stage for passes that sample a texture; maps the quad from
/// [-1, 1] clip space to [0, 1] texture coordinates.
pub const TEXCOORD_VERTEX_SHADER: &str = r#"
attribute vec4 aVertexPosition;
varying vec2 v_texCoord;
void main() {
    gl_Position = aVertexPosition;
    v_texCoord = aVertexPosition.xy * 0.5 + 0.5;
}
"#;

/// Inverse-distance-weighted point-light gradient.
///
/// `u_points` holds positions in aspect-corrected NDC; the parallel
/// `u_reds`/`u_greens`/`u_blues`/`u_alphas` arrays hold per-point channel
/// values that are interpolated over the whole surface.
pub fn gradient_fragment(num_points: usize) -> String {
    format!("#define NUM_POINTS {num_points}\n{GRADIENT_FRAGMENT_BODY}")
}

const GRADIENT_FRAGMENT_BODY: &str = r#"
precision mediump float;

uniform vec2 u_points[NUM_POINTS];

uniform float u_reds[NUM_POINTS];
uniform float u_greens[NUM_POINTS];
uniform float u_blues[NUM_POINTS];
uniform float u_alphas[NUM_POINTS];

uniform vec2 u_resolution;

float w_i(in vec2 x, in vec2 x_i, in float p) {
    float d = length(x - x_i);
    return pow(d, -p);
}

float u(in vec2 x, in float p, in float vals[NUM_POINTS], inout vec2 points[NUM_POINTS]) {
    float weight_sum = 0.0;
    float value_sum = 0.0;

    for (int i = 0; i < NUM_POINTS; ++i) {
        weight_sum += w_i(x, points[i], p) * vals[i];
        value_sum += w_i(x, points[i], p);
    }
    return weight_sum > 0.0 ? weight_sum / value_sum : 0.0;
}

void main() {
    float p = 4.0;

    vec2 ndc_frag = gl_FragCoord.xy / u_resolution * 2.0 - 1.0;

    float aspect_ratio = u_resolution.x / u_resolution.y;
    vec2 aspect_frag = vec2(ndc_frag.x * aspect_ratio, ndc_frag.y);

    vec2 points[NUM_POINTS];
    for (int i = 0; i < NUM_POINTS; ++i) {
        points[i] = vec2(u_points[i].x * aspect_ratio, u_points[i].y);
    }

    float r = u(aspect_frag, p, u_reds, points);
    float g = u(aspect_frag, p, u_greens, points);
    float b = u(aspect_frag, p, u_blues, points);
    float a = u(aspect_frag, p, u_alphas, points);

    gl_FragColor = vec4(r, g, b, a);
}
"#;

/// Hash-noise texcoord scatter of the previous pass.
///
/// `u_strength` scales the scatter offset; at 0.0 the pass is a pure
/// feed-through of its input.
pub const NOISE_FRAGMENT_SHADER: &str = r#"
precision mediump float;
uniform sampler2D u_firstPassTexture;
uniform float u_strength;
varying vec2 v_texCoord;

float noise(vec2 coord) {
    return fract(sin(dot(coord, vec2(12.9898, 78.233))) * 43758.5453);
}

void main() {
    float n = noise(v_texCoord * 10.0);
    vec2 scatter = vec2(noise(v_texCoord + n), noise(v_texCoord - n)) * u_strength;

    gl_FragColor = texture2D(u_firstPassTexture, v_texCoord + scatter);
}
"#;

/// Time- and pointer-driven ripple warp of the previous pass.
pub const WARP_FRAGMENT_SHADER: &str = r#"
precision mediump float;
uniform sampler2D u_firstPassTexture;
uniform vec2 u_mouse;
uniform float u_time;
varying vec2 v_texCoord;

void main() {
    vec2 centered = v_texCoord * 2.0 - 1.0;
    vec2 toward = centered - u_mouse;
    float d = length(toward);
    vec2 dir = d > 0.0001 ? toward / d : vec2(0.0, 0.0);

    float ripple = sin(d * 12.0 - u_time * 2.0) * 0.004 / (1.0 + d * 4.0);

    gl_FragColor = texture2D(u_firstPassTexture, v_texCoord + dir * ripple);
}
"#;

/// Pure copy of a sampler to the destination.
///
/// The sampler name is generated into the source: standalone present
/// pipelines use the [`PRESENT_TEXTURE_UNIFORM`] convention, while a chained
/// present stage is generated with the owning pipeline's input uniform so
/// the pipeline feeds it automatically.
pub fn present_fragment(sampler_name: &str) -> String {
    format!(
        r#"
precision mediump float;
uniform sampler2D {sampler_name};
varying vec2 v_texCoord;

void main() {{
    gl_FragColor = texture2D({sampler_name}, v_texCoord);
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_embeds_point_count() {
        let source = gradient_fragment(7);
        assert!(source.starts_with("#define NUM_POINTS 7\n"));
        assert!(source.contains("uniform vec2 u_points[NUM_POINTS];"));
    }

    #[test]
    fn test_gradient_declares_parallel_channel_arrays() {
        let source = gradient_fragment(5);
        for array in ["u_reds", "u_greens", "u_blues", "u_alphas"] {
            assert!(
                source.contains(&format!("uniform float {array}[NUM_POINTS];")),
                "missing {array}"
            );
        }
        assert!(source.contains("uniform vec2 u_resolution;"));
    }

    #[test]
    fn test_noise_is_feed_through_at_zero_strength() {
        // The scatter offset is the only texcoord perturbation and it is
        // scaled by u_strength, so 0.0 must sample unperturbed coordinates.
        assert!(NOISE_FRAGMENT_SHADER.contains("* u_strength"));
        assert!(NOISE_FRAGMENT_SHADER.contains("v_texCoord + scatter"));
        assert!(NOISE_FRAGMENT_SHADER.contains("uniform sampler2D u_firstPassTexture;"));
    }

    #[test]
    fn test_warp_declares_frame_uniforms() {
        assert!(WARP_FRAGMENT_SHADER.contains("uniform vec2 u_mouse;"));
        assert!(WARP_FRAGMENT_SHADER.contains("uniform float u_time;"));
        assert!(WARP_FRAGMENT_SHADER.contains("uniform sampler2D u_firstPassTexture;"));
    }

    #[test]
    fn test_present_sampler_name_is_generated() {
        let standalone = present_fragment(PRESENT_TEXTURE_UNIFORM);
        assert!(standalone.contains("uniform sampler2D u_texture;"));
        assert!(standalone.contains("texture2D(u_texture, v_texCoord)"));

        let chained = present_fragment("u_firstPassTexture");
        assert!(chained.contains("uniform sampler2D u_firstPassTexture;"));
    }

    #[test]
    fn test_vertex_stages_declare_quad_attribute() {
        assert!(QUAD_VERTEX_SHADER.contains("attribute vec2 aVertexPosition;"));
        assert!(TEXCOORD_VERTEX_SHADER.contains("attribute vec4 aVertexPosition;"));
        assert!(TEXCOORD_VERTEX_SHADER.contains("varying vec2 v_texCoord;"));
    }
}
