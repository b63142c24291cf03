//! Scene drawing on top of a [`RenderSurface`]

use glam::Vec2;

use super::surface::{CompositeMode, Layer, RenderSurface, Sprite};
use super::vertex::colors;
use crate::consts::*;
use crate::rotate_offset;
use crate::settings::Settings;
use crate::sim::{Lamp, LamplighterState, Scene, Spark, Sparkler, Street};

/// Alpha erased from the trail layer each frame
pub const TRAIL_FADE: f32 = 0.1;

const PROMPT_SIZE: f32 = 24.0;
const FPS_SIZE: f32 = 14.0;

/// Spark colour from remaining heat (life / max life).
///
/// White-hot above 0.8, yellow to orange down to 0.4, then orange to red
/// while fading out.
pub fn heat_color(heat: f32) -> [f32; 4] {
    let h = heat.clamp(0.0, 1.0);
    if h > 0.8 {
        let u = (h - 0.8) / 0.2;
        [1.0, 1.0, u, 1.0]
    } else if h >= 0.4 {
        let u = (h - 0.4) / 0.4;
        [1.0, 0.55 + 0.45 * u, 0.0, 1.0]
    } else {
        let u = h / 0.4;
        [1.0, 0.55 * u, 0.0, u]
    }
}

/// Draw one frame of the whole scene
pub fn draw_scene(scene: &Scene, settings: &Settings, surface: &mut impl RenderSurface) {
    surface.clear_layer(Layer::Backdrop);
    draw_street(&scene.street, surface);

    if settings.trails {
        surface.fade_layer(Layer::Trails, TRAIL_FADE);
    } else {
        surface.clear_layer(Layer::Trails);
    }
    surface.set_layer(Layer::Trails);
    draw_sparkler(&scene.sparkler, settings.ghost_hand, surface);
    draw_sparks(scene.sparkler.sparks(), surface);

    surface.clear_layer(Layer::Overlay);
    if settings.show_prompt {
        draw_prompt(scene, surface);
    }
}

fn draw_prompt(scene: &Scene, surface: &mut impl RenderSurface) {
    let Some(prompt) = scene.prompt() else {
        return;
    };
    surface.set_layer(Layer::Overlay);
    surface.set_composite(CompositeMode::SourceOver);
    let center = Vec2::new(scene.viewport.x / 2.0, scene.viewport.y / 2.0);
    surface.draw_text(prompt.text(), center, PROMPT_SIZE, colors::PROMPT);
}

pub fn draw_street(street: &Street, surface: &mut impl RenderSurface) {
    surface.set_layer(Layer::Backdrop);
    surface.set_composite(CompositeMode::SourceOver);
    let (w, h) = (street.width, street.height);

    surface.fill_rect_gradient(
        Vec2::ZERO,
        Vec2::new(w, h),
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    );

    for star in &street.stars.stars {
        let mut color = colors::STAR;
        color[3] = star.alpha;
        surface.fill_circle(star.pos, star.size, color);
    }

    if street.snow.enabled {
        for flake in &street.snow.flakes {
            let mut color = colors::SNOW;
            color[3] = flake.opacity;
            surface.fill_circle(flake.pos, flake.radius, color);
        }
    }

    surface.fill_rect(
        Vec2::new(0.0, h - GROUND_HEIGHT),
        Vec2::new(w, 100.0),
        colors::GROUND,
    );

    for lamp in &street.lamps {
        draw_lamp(lamp, surface);
    }

    draw_lamplighter(street, surface);
}

fn draw_lamp(lamp: &Lamp, surface: &mut impl RenderSurface) {
    let base = lamp.base;
    let h = lamp.pole_height;
    let head = lamp.head();
    let (head_w, head_h) = (20.0, 35.0);

    // Post
    surface.stroke_line(base, head, 4.0, colors::LAMP_IRON);

    // Ironwork loop halfway up
    let mid = Vec2::new(base.x, base.y - h * 0.5);
    let low = Vec2::new(base.x, base.y - h * 0.4);
    surface.stroke_polyline(
        &[
            mid,
            mid + Vec2::new(-8.0, 3.0),
            low + Vec2::new(-8.0, -3.0),
            low,
            low + Vec2::new(8.0, -3.0),
            mid + Vec2::new(8.0, 3.0),
            mid,
        ],
        2.0,
        colors::LAMP_IRON,
    );

    // Glass cage
    let cage_min = Vec2::new(head.x - head_w / 2.0, head.y - head_h);
    let glass = if lamp.lit {
        let [r, g, b] = colors::LAMP_GLASS_LIT;
        [r, g, b, 0.2 + lamp.glow * 0.5]
    } else {
        colors::LAMP_GLASS_DARK
    };
    surface.fill_rect(cage_min, Vec2::new(head_w, head_h), glass);
    let cage_max = cage_min + Vec2::new(head_w, head_h);
    surface.stroke_polyline(
        &[
            cage_min,
            Vec2::new(cage_max.x, cage_min.y),
            cage_max,
            Vec2::new(cage_min.x, cage_max.y),
            cage_min,
        ],
        2.0,
        colors::LAMP_IRON,
    );

    // Cap
    surface.fill_polygon(
        &[
            Vec2::new(cage_min.x - 5.0, cage_min.y),
            Vec2::new(head.x, cage_min.y - 15.0),
            Vec2::new(cage_max.x + 5.0, cage_min.y),
        ],
        colors::LAMP_CAP,
    );

    if lamp.lit && lamp.glow > 0.0 {
        let [ir, ig, ib] = colors::LAMP_GLOW_INNER;
        let [or, og, ob] = colors::LAMP_GLOW_OUTER;
        surface.set_composite(CompositeMode::Lighter);
        surface.fill_glow(
            Vec2::new(head.x, head.y - head_h / 2.0),
            60.0,
            [ir, ig, ib, lamp.glow],
            [or, og, ob, 0.0],
        );
        surface.set_composite(CompositeMode::SourceOver);
    }
}

fn draw_lamplighter(street: &Street, surface: &mut impl RenderSurface) {
    let walker = &street.lamplighter;
    let (x, y) = (walker.x, street.ground_y());
    let ink = colors::SILHOUETTE;
    let at = |dx: f32, dy: f32| Vec2::new(x + dx, y + dy);

    // Coat
    surface.fill_polygon(&[at(0.0, 0.0), at(-10.0, -40.0), at(10.0, -40.0), at(8.0, 0.0)], ink);
    // Head
    surface.fill_circle(at(0.0, -50.0), 6.0, ink);
    // Uniform cap
    surface.fill_polygon(
        &[at(-7.0, -52.0), at(8.0, -52.0), at(5.0, -58.0), at(-5.0, -58.0)],
        ink,
    );

    if matches!(walker.state, LamplighterState::Lighting { .. }) {
        // Reaching up, long pole to the lamp
        surface.stroke_line(at(5.0, -40.0), at(15.0, -70.0), 2.0, ink);
        surface.stroke_line(at(15.0, -65.0), at(18.0, -180.0), 2.0, ink);
    } else {
        // Carrying the pole over the shoulder
        surface.stroke_line(at(5.0, -40.0), at(10.0, -25.0), 2.0, ink);
        surface.stroke_line(at(10.0, -25.0), at(-5.0, -80.0), 2.0, ink);
    }
}

pub fn draw_sparkler(sparkler: &Sparkler, ghost_hand: bool, surface: &mut impl RenderSurface) {
    surface.set_composite(CompositeMode::SourceOver);
    let t = sparkler.tuning();
    let to_screen = |local: Vec2| sparkler.pos + rotate_offset(local, sparkler.angle);

    if ghost_hand && !sparkler.is_dropping() {
        surface.draw_sprite(
            Sprite::Hand,
            to_screen(Vec2::new(0.0, -25.0)),
            sparkler.angle,
            0.3,
            0.5,
        );
    }

    let handle_top = -t.handle_length;
    let fuel_top = handle_top - t.length;
    let unburnt_top = fuel_top + sparkler.burnt_length();

    // Wire runs the whole length
    let wire_from = to_screen(Vec2::ZERO);
    let wire_to = to_screen(Vec2::new(0.0, fuel_top));
    surface.stroke_line(wire_from, wire_to, SPARKLER_THICKNESS, colors::WIRE_SHADE);
    surface.stroke_line(wire_from, wire_to, SPARKLER_THICKNESS * 0.4, colors::WIRE);

    if !sparkler.is_burnt_out() {
        let from = to_screen(Vec2::new(0.0, unburnt_top));
        let to = to_screen(Vec2::new(0.0, handle_top));
        surface.stroke_line(from, to, SPARKLER_THICKNESS + 3.0, colors::FUEL_SHADE);
        surface.stroke_line(from, to, SPARKLER_THICKNESS + 1.0, colors::FUEL);
    }

    if sparkler.is_lit() {
        let tip = sparkler.tip();
        surface.set_composite(CompositeMode::Lighter);
        surface.fill_glow(tip, 15.0, colors::TIP_HALO, [1.0, 0.4, 0.0, 0.0]);
        surface.fill_circle(tip, 6.0, colors::TIP_GLOW);
        surface.set_composite(CompositeMode::SourceOver);
        surface.fill_circle(tip, 3.0, colors::TIP_CORE);
    }
}

/// FPS counter in the top-left corner. Call after [`draw_scene`], which
/// clears the overlay.
pub fn draw_fps(fps: u32, surface: &mut impl RenderSurface) {
    surface.set_layer(Layer::Overlay);
    surface.set_composite(CompositeMode::SourceOver);
    surface.draw_text(&format!("{fps} FPS"), Vec2::new(40.0, 20.0), FPS_SIZE, colors::PROMPT);
}

/// Sparks in additive mode; fast ones as streaks from their last position
pub fn draw_sparks(sparks: &[Spark], surface: &mut impl RenderSurface) {
    surface.set_composite(CompositeMode::Lighter);
    for spark in sparks {
        let color = heat_color(spark.heat());
        if spark.speed() > SPARK_STREAK_SPEED {
            surface.stroke_line(spark.prev_pos, spark.pos, spark.size, color);
        } else {
            surface.fill_circle(spark.pos, spark.size, color);
        }
    }
    surface.set_composite(CompositeMode::SourceOver);
}
