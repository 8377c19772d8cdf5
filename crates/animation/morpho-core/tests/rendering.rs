use approx::assert_abs_diff_eq;
use morpho_core::{
    ActionArgs, Actor, Animation, Camera, CommandRecorder, Complex64,
    Config, DrawCommand, Layer, Path, Point,
};

fn dot_centers(rec: &CommandRecorder) -> Vec<(f64, f64)> {
    rec.commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Dot { center, .. } => Some(*center),
            DrawCommand::Polyline { .. } => None,
        })
        .collect()
}

#[test]
fn camera_keyframes_zoom_the_layer() {
    let mut layer = Layer::default();
    let mut wide = Camera::default();
    wide.zoom_in(0.5).unwrap();
    assert_eq!(wide.view().unwrap(), [-10.0, 10.0, -10.0, 10.0]);
    layer.camera_mut().newkey(10, Some(wide)).unwrap();
    layer.add(Actor::from_figure(Point::at(5.0, 0.0)));

    let mut rec = CommandRecorder::new(100, 100);
    for (f, x) in [(0.0, 100.0), (5.0, 250.0 / 3.0), (10.0, 75.0)] {
        rec.clear();
        layer.draw(f, &mut rec).unwrap();
        let centers = dot_centers(&rec);
        assert_eq!(centers.len(), 1);
        assert_abs_diff_eq!(centers[0].0, x, epsilon = 1e-9);
        assert_abs_diff_eq!(centers[0].1, 50.0, epsilon = 1e-9);
    }
}

#[test]
fn recentred_camera_moves_the_origin() {
    let mut cam = Camera::default();
    cam.center_at(Complex64::new(5.0, 5.0)).unwrap();
    let mut layer = Layer::new(cam);
    layer.add(Actor::from_figure(Point::at(5.0, 5.0)));

    let mut rec = CommandRecorder::new(200, 100);
    layer.draw(0.0, &mut rec).unwrap();
    assert_eq!(dot_centers(&rec), vec![(100.0, 50.0)]);
}

#[test]
fn paths_draw_their_visible_span() {
    let mut path = Path::new(vec![
        Complex64::new(-5.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(5.0, 0.0),
    ]);
    path.set_span(0.0, 0.5).unwrap();
    let mut layer = Layer::default();
    layer.add(Actor::from_figure(path));

    let mut rec = CommandRecorder::new(100, 100);
    layer.draw(0.0, &mut rec).unwrap();
    match rec.commands.as_slice() {
        [DrawCommand::Polyline { points, style }] => {
            assert_eq!(points, &vec![(0.0, 50.0), (50.0, 50.0)]);
            assert_eq!(style.fill, None);
            assert_eq!(style.stroke_width, 3.0);
        }
        other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn layers_stack_bottom_first_and_actors_sort_by_depth() {
    let mut anim = Animation::new(Config::default());

    let mut bottom = Layer::default();
    let mut high = Point::at(1.0, 0.0);
    high.set_zdepth(3.0).unwrap();
    bottom.add(Actor::from_figure(high));
    bottom.add(Actor::from_figure(Point::at(2.0, 0.0)));
    anim.add_layer(bottom);

    let mut top = Layer::default();
    top.add(Actor::from_figure(Point::at(-5.0, 0.0)));
    anim.add_layer(top);

    let mut rec = CommandRecorder::new(100, 100);
    anim.draw_frame(0.0, &mut rec).unwrap();
    let xs: Vec<f64> = dot_centers(&rec).into_iter().map(|(x, _)| x).collect();
    assert_eq!(xs, vec![70.0, 60.0, 0.0]);
}

#[test]
fn actions_drive_what_gets_drawn() {
    let mut layer = Layer::default();
    let id = layer.add(Actor::from_figure(Point::at(0.0, 0.0)));
    {
        let actor = layer.actor_mut::<Point>(id).unwrap();
        actor
            .act("shift_by", &ActionArgs::duration(10).offset(2.0, 0.0))
            .unwrap();
        actor.act("fade_out", &ActionArgs::duration(10)).unwrap();
        assert_eq!(actor.key_ids(), vec![0, 10, 20]);
    }

    let mut rec = CommandRecorder::new(100, 100);
    layer.draw(10.0, &mut rec).unwrap();
    assert_eq!(dot_centers(&rec), vec![(70.0, 50.0)]);

    rec.clear();
    layer.draw(15.0, &mut rec).unwrap();
    match rec.commands.as_slice() {
        [DrawCommand::Dot { style, .. }] => assert_abs_diff_eq!(style.alpha, 0.5, epsilon = 1e-12),
        other => panic!("unexpected commands {other:?}"),
    }

    rec.clear();
    layer.draw(20.0, &mut rec).unwrap();
    assert!(rec.commands.is_empty());
}
