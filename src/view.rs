use rcoulomb::library::*;
use rcoulomb::{ParticleMesh, ParticleParticle};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::{Canvas, RenderTarget};

const PINK: Color = Color::RGB(255, 109, 194);
const PURPLE: Color = Color::RGB(200, 122, 255);
const SKYBLUE: Color = Color::RGB(102, 191, 255);
const GRAY: Color = Color::RGB(130, 130, 130);

/// Field arrows longer than this are clipped.
const MAX_ARROW: f32 = 10.0;
/// Field arrows shorter than this are not drawn.
const MIN_ARROW: f32 = 2.0;

fn to_abgr(color: Color) -> Color {
    Color::RGBA(color.a, color.b, color.g, color.r)
}

fn charge_color(charge: f32, positive: Color) -> Color {
    if charge > 0.0 { positive } else { SKYBLUE }
}

pub fn draw_pp<T: RenderTarget>(pp: &ParticleParticle, canvas: &mut Canvas<T>) {
    for p in pp.particles() {
        let [x, y] = p.position;
        let color = to_abgr(charge_color(p.charge, PURPLE));
        let _ = canvas.filled_circle(x as i16, y as i16, 4, color);
    }
}

pub fn draw_pm<T: RenderTarget>(pm: &ParticleMesh, canvas: &mut Canvas<T>) {
    let field = pm.field();
    let gray = to_abgr(GRAY);
    for (col, row, sample) in field.cells() {
        let start = field.position(col, row);
        let m = get_magnitude(sample);
        if m > MIN_ARROW {
            let m = m.min(MAX_ARROW);
            let end = add(start, scale(normalize(sample), m));
            let _ = canvas.line(start[0] as i16, start[1] as i16, end[0] as i16, end[1] as i16, gray);
        }
    }

    for s in pm.sources() {
        let [x, y] = s.position;
        let color = to_abgr(charge_color(s.charge, PINK));
        let _ = canvas.filled_circle(x as i16, y as i16, 6, color);
    }
}
