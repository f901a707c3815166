//! GLSL sources for the fractal pass.
//!
//! The vertex stage synthesizes a full-screen triangle strip from
//! `gl_VertexID`, so no vertex buffer is needed. The fragment stage runs the
//! escape iteration in double precision. `glow` has no `f64` uniform setters,
//! so every double crosses the FFI boundary as the two `u32` halves of its
//! IEEE-754 bit pattern and is reassembled with `packDouble2x32` (low word
//! first), which keeps all 64 bits exact.

pub const VERTEX_SHADER: &str = r#"
    #version 410 core
    void main() {
        vec2 positions[4] = vec2[](
            vec2(-1.0, -1.0),
            vec2( 1.0, -1.0),
            vec2(-1.0,  1.0),
            vec2( 1.0,  1.0)
        );
        gl_Position = vec4(positions[gl_VertexID], 0.0, 1.0);
    }
"#;

pub const FRAGMENT_SHADER: &str = r#"
    #version 410 core

    uniform vec2 u_resolution;        // render target size in pixels
    uniform uvec2 u_center_re;        // f64 bits, (low, high)
    uniform uvec2 u_center_im;        // f64 bits, (low, high)
    uniform uvec2 u_zoom;             // f64 bits, (low, high)
    uniform int u_iteration_cap;
    uniform float u_color_freq;
    uniform bool u_smooth_coloring;
    uniform bool u_apply_budget;
    uniform sampler2D u_budget_map;   // 64x64 R32F, per-tile cap fraction

    out vec4 frag_color;

    void main() {
        vec2 uv = (gl_FragCoord.xy - 0.5 * u_resolution.xy)
                / min(u_resolution.x, u_resolution.y);

        int cap = u_iteration_cap;
        if (u_apply_budget) {
            float budget = texture(u_budget_map, gl_FragCoord.xy / u_resolution.xy).r;
            cap = max(16, int(budget * float(u_iteration_cap) + 0.5));
        }

        dvec2 center = dvec2(packDouble2x32(u_center_re), packDouble2x32(u_center_im));
        double zoom = packDouble2x32(u_zoom);
        dvec2 c = center + dvec2(uv) * zoom;

        dvec2 z = dvec2(0.0);
        int iter = 0;
        while (dot(z, z) < 16.0 && iter < cap) {
            z = dvec2(z.x * z.x - z.y * z.y + c.x, 2.0 * z.x * z.y + c.y);
            iter++;
        }

        if (iter >= cap) {
            frag_color = vec4(0.0, 0.0, 0.0, 1.0);
        } else {
            float t;
            if (u_smooth_coloring) {
                float dist = length(vec2(z));
                t = float(iter) - log2(log2(dist)) + 4.0;
            } else {
                t = float(iter);
            }
            vec3 color = 0.5 + 0.5 * cos(3.0 + t * u_color_freq + vec3(0.0, 0.6, 1.0));
            frag_color = vec4(color, 1.0);
        }
    }
"#;
