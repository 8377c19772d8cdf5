use std::f64::consts::{PI, TAU};

use approx::assert_abs_diff_eq;
use morpho_core::interp::functions::{argument, from_polar, modulus};
use morpho_core::{
    Actor, Complex64, Figure, MorphoError, Path, Point, TweenMethod, TweenPolicy, TweenValue,
    Transition,
};

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn methods() -> Vec<TweenMethod> {
    vec![
        TweenMethod::Linear,
        TweenMethod::Spiral,
        TweenMethod::pivot(PI / 3.0).unwrap(),
        TweenMethod::pivot(-1.5 * PI).unwrap(),
        TweenMethod::Instant,
    ]
}

#[test]
fn endpoints_are_copies_for_every_method() {
    let mut a = Point::at(1.0, 2.0);
    a.set_alpha(0.3).unwrap();
    let b = Point::at(-4.0, 0.5);
    for m in methods() {
        assert_eq!(a.tween_with(m, &b, 0.0).unwrap(), a, "{m:?} at t=0");
        assert_eq!(a.tween_with(m, &b, 1.0).unwrap(), b, "{m:?} at t=1");
    }

    let p = Path::new(vec![c(0.0, 0.0), c(1.0, 0.0)]);
    let q = Path::new(vec![c(0.0, 1.0), c(1.0, 1.0), c(2.0, 1.0)]);
    for m in methods() {
        assert_eq!(p.tween_with(m, &q, 0.0).unwrap(), p);
        assert_eq!(p.tween_with(m, &q, 1.0).unwrap(), q);
    }
}

#[test]
fn copies_do_not_alias() {
    let a = Point::at(1.0, 1.0);
    let mut copy = a.clone();
    assert_eq!(copy, a);
    copy.set_pos(c(9.0, 9.0)).unwrap();
    assert_eq!(a.pos(), c(1.0, 1.0));
    assert_ne!(copy, a);
}

#[test]
fn linear_midpoint() {
    let mut a = Point::at(0.0, 0.0);
    let mut b = Point::at(3.0, -7.0);
    a.set_alpha(0.2).unwrap();
    b.set_alpha(0.9).unwrap();
    let mid = a.tween_linear(&b, 0.5).unwrap();
    assert_abs_diff_eq!(mid.pos().re, 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(mid.pos().im, -3.5, epsilon = 1e-12);
    assert_abs_diff_eq!(mid.alpha(), 0.55, epsilon = 1e-12);
}

#[test]
fn spiral_takes_the_short_way_around() {
    let a = Point::new(from_polar(2.0, 0.1));
    let b = Point::new(from_polar(2.0, TAU - 0.1));
    let mid = a.tween_spiral(&b, 0.5).unwrap();
    assert_abs_diff_eq!(argument(mid.pos()), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(modulus(mid.pos()), 2.0, epsilon = 1e-12);
}

#[test]
fn degenerate_pivots_are_rejected() {
    let a = Point::at(0.0, 0.0);
    let b = Point::at(1.0, 0.0);
    for angle in [0.0, TAU, -TAU, 4.0 * PI] {
        assert!(matches!(
            a.tween_pivot(&b, 0.5, angle),
            Err(MorphoError::DegeneratePivot { .. })
        ));
    }
}

#[test]
fn instant_holds_the_start() {
    let a = Point::at(0.0, 0.0);
    let b = Point::at(1.0, 0.0);
    assert_eq!(a.tween_instant(&b, 0.99).unwrap(), a);
}

#[test]
fn transition_reshapes_parameter_before_the_method() {
    let mut a = Point::at(0.0, 0.0);
    a.set_policy(TweenPolicy::new(TweenMethod::Linear, Transition::QuadEase));
    let b = Point::at(8.0, 0.0);
    // quad_ease(0.25) = 0.125
    assert_abs_diff_eq!(a.tween(&b, 0.25).unwrap().pos().re, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        a.tween_ext(&b, 0.25, true).unwrap().pos().re,
        2.0,
        epsilon = 1e-12
    );
}

#[test]
fn linear_actor_scenario() {
    let mut actor = Actor::from_figure(Point::at(0.0, 0.0));
    actor.newkey(30, Some(Point::at(10.0, 0.0))).unwrap();
    let pos = actor.time(15.0).unwrap().unwrap().pos();
    assert_abs_diff_eq!(pos.re, 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pos.im, 0.0, epsilon = 1e-12);
}

#[test]
fn pivot_actor_scenario() {
    let start = Point::at(0.0, 0.0).with_method(TweenMethod::pivot(PI).unwrap());
    let mut actor = Actor::from_figure(start);
    actor.newkey(30, Some(Point::at(10.0, 0.0))).unwrap();
    let pos = actor.time(15.0).unwrap().unwrap().pos();
    // equidistant from both ends, radius 5 off the chord midpoint
    assert_abs_diff_eq!(pos.re, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pos.im.abs(), 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        modulus(pos - c(0.0, 0.0)),
        modulus(pos - c(10.0, 0.0)),
        epsilon = 1e-9
    );
}

#[test]
fn path_function_image_squares_nodes() {
    let path = Path::new(vec![c(1.0, 0.0), c(0.0, 1.0)]);
    let squared = path.fimage(&|z| z * z).unwrap();
    let seq = squared.seq();
    assert_abs_diff_eq!(seq[0].re, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(seq[0].im, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(seq[1].re, -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(seq[1].im, 0.0, epsilon = 1e-12);
    // untouched source
    assert_eq!(path.seq(), vec![c(1.0, 0.0), c(0.0, 1.0)]);
}

#[test]
fn function_valued_tweenables_blend() {
    use morpho_core::{FigureState, TagSet, TweenFn, Tweenable};

    let state_with = |f: TweenFn| {
        FigureState::new()
            .with(Tweenable::new("curve", f, TagSet::FUNCTION).unwrap())
            .unwrap()
    };
    let a = state_with(TweenFn::new(|x| x));
    let b = state_with(TweenFn::new(|x| 3.0 * x));
    let mid = morpho_core::interp::linear_state(&a, &b, 0.5, &[]).unwrap();
    match mid.value("curve") {
        Some(TweenValue::Function(h)) => assert_abs_diff_eq!(h.call(2.0), 4.0, epsilon = 1e-12),
        other => panic!("expected a function, got {other:?}"),
    }
}
