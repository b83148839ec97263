use vizbind::Color;
use vizlab::data::{ScatterPoint, Variable};
use vizlab::labs::bubbles::{BubblesEvent, BubblesState};
use vizlab::labs::map::{MapEvent, MapState};
use vizlab::labs::scatter::{ScatterEvent, ScatterState};

const RED: Color = Color::rgb(255, 0, 0);

// =============================================================================
// Bubbles
// =============================================================================

#[test]
fn test_bubbles_defaults() {
    let state = BubblesState::new((1998, 2002));
    assert_eq!(state.year, 2000);
    assert_eq!(state.x, Variable::Income);
    assert_eq!(state.y, Variable::LifeExp);
    assert_eq!(state.size, Variable::Population);
}

#[test]
fn test_bubbles_default_year_clamped_to_data() {
    assert_eq!(BubblesState::new((2005, 2010)).year, 2005);
    assert_eq!(BubblesState::new((1950, 1960)).year, 1960);
}

#[test]
fn test_bubbles_year_steps_within_extent() {
    let state = BubblesState::new((1998, 2002));
    let state = state.reduce(BubblesEvent::StepYear(1));
    assert_eq!(state.year, 2001);
    let state = state
        .reduce(BubblesEvent::StepYear(1))
        .reduce(BubblesEvent::StepYear(1));
    assert_eq!(state.year, 2002);
    let state = state.reduce(BubblesEvent::SetYear(1900));
    assert_eq!(state.year, 1998);
}

#[test]
fn test_bubbles_variable_changes() {
    let state = BubblesState::new((1998, 2002))
        .reduce(BubblesEvent::SetX(Variable::Gdp))
        .reduce(BubblesEvent::SetSize(Variable::ChildDeaths));
    assert_eq!(state.variables(), (Variable::Gdp, Variable::LifeExp, Variable::ChildDeaths));
    assert_eq!(state.year, 2000);
}

#[test]
fn test_bubbles_hover_keeps_year_and_variables() {
    let state = BubblesState::new((1998, 2002))
        .reduce(BubblesEvent::Hover(Some("Japan".into())))
        .reduce(BubblesEvent::StepYear(1));
    assert_eq!(state.hovered.as_deref(), Some("Japan"));
    assert_eq!(state.year, 2001);

    let state = state.reduce(BubblesEvent::Hover(None));
    assert_eq!(state.hovered, None);
    assert_eq!(state.variables(), (Variable::Income, Variable::LifeExp, Variable::Population));
}

#[test]
fn test_bubbles_cycle_wraps() {
    let mut state = BubblesState::new((1998, 2002));
    for _ in 0..Variable::ALL.len() {
        state = state.reduce(BubblesEvent::CycleY);
    }
    assert_eq!(state.y, Variable::LifeExp);
    assert_eq!(state.reduce(BubblesEvent::CycleX).x, Variable::LifeExp);
    assert_eq!(Variable::ChildDeaths.next(), Variable::Income);
}

// =============================================================================
// Scatter
// =============================================================================

fn points() -> Vec<ScatterPoint> {
    vec![
        ScatterPoint::new(10.0, 20.0, Color::BLACK),
        ScatterPoint::new(50.0, 50.0, Color::BLACK),
    ]
}

#[test]
fn test_scatter_add_appends() {
    let state = ScatterState::new(points()).reduce(ScatterEvent::Add(ScatterPoint::new(1.0, 2.0, RED)));
    assert_eq!(state.points.len(), 3);
    assert_eq!(state.points[2], ScatterPoint::new(1.0, 2.0, RED));
}

#[test]
fn test_scatter_remove_last() {
    let state = ScatterState::new(points()).reduce(ScatterEvent::RemoveLast);
    assert_eq!(state.points, vec![ScatterPoint::new(10.0, 20.0, Color::BLACK)]);
}

#[test]
fn test_scatter_remove_from_empty_is_noop() {
    let state = ScatterState::default().reduce(ScatterEvent::RemoveLast);
    assert!(state.points.is_empty());
}

#[test]
fn test_scatter_jitter_offsets_by_position() {
    let state = ScatterState::new(points()).reduce(ScatterEvent::Jitter(vec![(1.0, -2.0), (-4.5, 3.0)]));
    assert_eq!(state.points[0].x, 11.0);
    assert_eq!(state.points[0].y, 18.0);
    assert_eq!(state.points[1].x, 45.5);
    assert_eq!(state.points[1].y, 53.0);
    assert_eq!(state.points[1].color, Color::BLACK);
}

#[test]
fn test_scatter_jitter_with_fewer_offsets() {
    let state = ScatterState::new(points()).reduce(ScatterEvent::Jitter(vec![(1.0, 1.0)]));
    assert_eq!(state.points[0].x, 11.0);
    assert_eq!(state.points[1].x, 50.0);
}

// =============================================================================
// Map
// =============================================================================

fn settings() -> Vec<String> {
    ["ALL CRIMES", "ALLEY", "BANK"].iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_map_starts_on_first_setting() {
    assert_eq!(MapState::new(settings()).setting(), "ALL CRIMES");
}

#[test]
fn test_map_next_and_previous_wrap() {
    let state = MapState::new(settings());
    assert_eq!(state.clone().reduce(MapEvent::Previous).setting(), "BANK");
    let state = state.reduce(MapEvent::Next).reduce(MapEvent::Next).reduce(MapEvent::Next);
    assert_eq!(state.setting(), "ALL CRIMES");
}

#[test]
fn test_map_hover_keeps_selection() {
    let state = MapState::new(settings())
        .reduce(MapEvent::Next)
        .reduce(MapEvent::Hover(Some(7)));
    assert_eq!(state.hovered, Some(7));
    assert_eq!(state.setting(), "ALLEY");
    assert_eq!(state.reduce(MapEvent::Hover(None)).hovered, None);
}

#[test]
fn test_map_select_by_name() {
    let state = MapState::new(settings()).reduce(MapEvent::Select("BANK".into()));
    assert_eq!(state.selected, 2);
    let state = state.reduce(MapEvent::Select("AIRCRAFT".into()));
    assert_eq!(state.setting(), "BANK");
}

#[test]
fn test_map_without_settings() {
    let state = MapState::default().reduce(MapEvent::Next);
    assert_eq!(state.selected, 0);
    assert_eq!(state.setting(), "ALL CRIMES");
}
