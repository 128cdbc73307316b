// --- File: quoridor-service/quoridor-core/src/validator.rs ---

//! Move Validator (C4): legality of pawn moves (including jumps) and
//! wall placements, plus turn gating and applying an accepted action.
//! Queries the Wall Index and Pathfinder; never mutates a `GameState`
//! except through `apply_pawn_move`/`apply_wall` once an action has
//! been fully validated.

use crate::board;
use crate::errors::ErrorKind;
use crate::game::GameState;
use crate::pathfinder::Pathfinder;
use crate::player::PlayerId;
use crate::types::{Position, Wall, BOARD_SIZE};
use crate::wall_index::SpeculativeWall;

/// Checks `status = in_progress` and `acting == current_turn`. Every
/// action (pawn move, wall placement, opponent turn) gates on this
/// first.
pub fn check_turn(state: &GameState, acting: PlayerId) -> Result<(), ErrorKind> {
    if state.status != crate::game::Status::InProgress {
        return Err(ErrorKind::GameFinished);
    }
    if acting != state.current_turn {
        return Err(ErrorKind::NotYourTurn);
    }
    Ok(())
}

/// The legal pawn-move destinations for `player`, in a stable order
/// (direct neighbors in fixed up/right/down/left order, then any jump
/// destinations). Computed fresh every call per spec; the board is
/// small enough that this is cheap.
pub fn legal_pawn_destinations(state: &GameState, player: PlayerId) -> Vec<Position> {
    let me = state.player(player).position;
    let opp = state.player(player.opponent()).position;
    let mut out = Vec::with_capacity(4);

    for n in board::neighbors(me, &state.walls) {
        if n == opp {
            for dest in jump_destinations(me, opp, &state.walls) {
                if !out.contains(&dest) {
                    out.push(dest);
                }
            }
        } else if !out.contains(&n) {
            out.push(n);
        }
    }

    out
}

/// Given the jumping player at `me` adjacent to the opponent at `opp`,
/// returns the straight-jump destination if clear, else both diagonal
/// destinations that aren't blocked.
fn jump_destinations(me: Position, opp: Position, walls: &crate::wall_index::WallIndex) -> Vec<Position> {
    let dr = opp.0 as isize - me.0 as isize;
    let dc = opp.1 as isize - me.1 as isize;
    let behind_r = opp.0 as isize + dr;
    let behind_c = opp.1 as isize + dc;

    let behind = if behind_r >= 0 && behind_c >= 0 {
        let behind = (behind_r as usize, behind_c as usize);
        if board::in_bounds(behind) && !walls.is_blocked(opp, behind) {
            Some(behind)
        } else {
            None
        }
    } else {
        None
    };

    if let Some(behind) = behind {
        return vec![behind];
    }

    // Straight jump blocked or off-board: diagonals are the opponent's
    // other unblocked neighbors, excluding the square the jumper came from.
    board::neighbors(opp, walls)
        .into_iter()
        .filter(|&n| n != me)
        .collect()
}

/// Full legality check for a wall placement: range, overlap, cross,
/// and (via the scoped speculative-insert idiom) the path-connectivity
/// invariant for both players. Does not check `walls_remaining` —
/// callers that need the `no_walls_remaining` distinction call that
/// first.
pub fn wall_is_legal(state: &mut GameState, wall: Wall) -> bool {
    if !wall.in_anchor_range() {
        return false;
    }
    if state.walls.would_overlap(wall) || state.walls.would_cross(wall) {
        return false;
    }

    let guard = SpeculativeWall::insert(&mut state.walls, wall);
    let pf = Pathfinder::new(guard.walls());
    let p1_ok = pf.reachable(state.player1.position, |p| p.0 == state.player1.goal_row);
    let p2_ok = pf.reachable(state.player2.position, |p| p.0 == state.player2.goal_row);
    p1_ok && p2_ok
}

/// All legal wall placements for `player` across the whole board, each
/// individually run through the speculative path-connectivity check
/// (§4.7, `list_valid_actions`). Empty if the player has no walls left.
pub fn legal_wall_placements(state: &mut GameState, player: PlayerId) -> Vec<Wall> {
    if state.player(player).walls_remaining == 0 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for row in 0..BOARD_SIZE - 1 {
        for col in 0..BOARD_SIZE - 1 {
            for orientation in [crate::types::Orientation::Horizontal, crate::types::Orientation::Vertical] {
                let wall = Wall::new(row, col, orientation);
                if wall_is_legal(state, wall) {
                    out.push(wall);
                }
            }
        }
    }
    out
}

/// Applies an already-validated pawn move: updates position, checks
/// for a win, and advances `turn_count`/`current_turn` per §4.4.
pub fn apply_pawn_move(state: &mut GameState, player: PlayerId, destination: Position) -> Result<(), ErrorKind> {
    check_turn(state, player)?;
    let legal = legal_pawn_destinations(state, player);
    if !legal.contains(&destination) {
        return Err(ErrorKind::InvalidMove);
    }

    state.player_mut(player).position = destination;
    state.turn_count += 1;

    if state.player(player).at_goal() {
        state.status = crate::game::Status::Finished;
        state.winner = Some(player);
    } else {
        state.current_turn = player.opponent();
    }

    state.touch();
    Ok(())
}

/// Applies an already-validated wall placement: commits the wall and
/// decrements the player's counter, per §4.4.
pub fn apply_wall(state: &mut GameState, player: PlayerId, wall: Wall) -> Result<(), ErrorKind> {
    check_turn(state, player)?;

    if state.player(player).walls_remaining == 0 {
        return Err(ErrorKind::NoWallsRemaining);
    }
    if !wall.in_anchor_range() || state.walls.would_overlap(wall) || state.walls.would_cross(wall) {
        return Err(ErrorKind::InvalidWallPosition);
    }

    state.walls.insert(wall);
    let pf = Pathfinder::new(&state.walls);
    let p1_ok = pf.reachable(state.player1.position, |p| p.0 == state.player1.goal_row);
    let p2_ok = pf.reachable(state.player2.position, |p| p.0 == state.player2.goal_row);
    if !(p1_ok && p2_ok) {
        state.walls.remove(wall);
        return Err(ErrorKind::PathBlocked);
    }

    state.player_mut(player).walls_remaining -= 1;
    state.turn_count += 1;
    state.current_turn = player.opponent();
    state.touch();
    Ok(())
}

/// Re-checks the invariants of §3 against a freshly-mutated state. The
/// validator above is supposed to make violations unreachable; this is
/// the post-apply backstop the registry runs before trusting its own
/// mutation, so a bug here is caught as a poisoned game instead of
/// silently serving an inconsistent state to callers (§7, "programmer
/// errors").
pub fn check_invariants(state: &GameState) -> Result<(), &'static str> {
    if state.player1.position == state.player2.position {
        return Err("pawn positions are not distinct");
    }
    if !board::in_bounds(state.player1.position) || !board::in_bounds(state.player2.position) {
        return Err("a pawn position is out of bounds");
    }

    let total_walls = state.player1.walls_remaining as usize
        + state.player2.walls_remaining as usize
        + state.walls.len();
    if total_walls != 2 * crate::game::INITIAL_WALLS_PER_PLAYER as usize {
        return Err("wall counter and placed walls no longer sum to the starting total");
    }

    let pf = Pathfinder::new(&state.walls);
    if !pf.reachable(state.player1.position, |p| p.0 == state.player1.goal_row) {
        return Err("player 1 has no path to their goal row");
    }
    if !pf.reachable(state.player2.position, |p| p.0 == state.player2.goal_row) {
        return Err("player 2 has no path to their goal row");
    }

    let someone_on_goal = state.player1.at_goal() || state.player2.at_goal();
    match state.status {
        crate::game::Status::Finished if state.winner.is_none() || !someone_on_goal => {
            return Err("finished status without a winner on their goal row");
        }
        crate::game::Status::InProgress if someone_on_goal => {
            return Err("in-progress game has a pawn already on a goal row");
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;
    use uuid::Uuid;

    fn fresh() -> GameState {
        GameState::new(Uuid::nil(), "p1", "p2")
    }

    #[test]
    fn opening_pawn_moves_are_the_three_forward_cells() {
        let state = fresh();
        let mut moves = legal_pawn_destinations(&state, PlayerId::Player1);
        moves.sort();
        let mut expected = vec![(7, 4), (8, 3), (8, 5)];
        expected.sort();
        assert_eq!(moves, expected);
    }

    #[test]
    fn scenario_a_straight_jump() {
        let mut state = fresh();
        state.player1.position = (5, 4);
        state.player2.position = (4, 4);
        state.current_turn = PlayerId::Player1;
        let moves = legal_pawn_destinations(&state, PlayerId::Player1);
        assert!(moves.contains(&(3, 4)));
    }

    #[test]
    fn scenario_b_diagonal_jump_when_wall_behind_opponent() {
        let mut state = fresh();
        state.player1.position = (4, 4);
        state.player2.position = (3, 4);
        state.walls.insert(Wall::new(2, 3, Orientation::Horizontal));
        let moves = legal_pawn_destinations(&state, PlayerId::Player1);
        assert!(moves.contains(&(3, 3)));
        assert!(moves.contains(&(3, 5)));
        assert!(!moves.contains(&(2, 4)));
    }

    #[test]
    fn scenario_c_wall_overlap_rejected() {
        let mut state = fresh();
        apply_wall(&mut state, PlayerId::Player1, Wall::new(3, 3, Orientation::Horizontal)).unwrap();
        assert!(!wall_is_legal(&mut state, Wall::new(3, 4, Orientation::Horizontal)));
    }

    #[test]
    fn scenario_d_wall_cross_rejected() {
        let mut state = fresh();
        apply_wall(&mut state, PlayerId::Player1, Wall::new(3, 3, Orientation::Horizontal)).unwrap();
        assert!(!wall_is_legal(&mut state, Wall::new(3, 3, Orientation::Vertical)));
    }

    #[test]
    fn scenario_f_victory_stops_toggling_and_locks_game() {
        let mut state = fresh();
        state.player1.position = (1, 4);
        state.current_turn = PlayerId::Player1;
        let before_turns = state.turn_count;
        apply_pawn_move(&mut state, PlayerId::Player1, (0, 4)).unwrap();
        assert_eq!(state.status, crate::game::Status::Finished);
        assert_eq!(state.winner, Some(PlayerId::Player1));
        assert_eq!(state.turn_count, before_turns + 1);
        assert_eq!(state.current_turn, PlayerId::Player1); // not toggled further

        let err = apply_pawn_move(&mut state, PlayerId::Player2, (1, 4)).unwrap_err();
        assert_eq!(err, ErrorKind::GameFinished);
    }

    #[test]
    fn not_your_turn_is_rejected() {
        let mut state = fresh();
        let err = apply_pawn_move(&mut state, PlayerId::Player2, (1, 4)).unwrap_err();
        assert_eq!(err, ErrorKind::NotYourTurn);
    }

    #[test]
    fn invalid_wall_position_out_of_range() {
        let mut state = fresh();
        assert!(!wall_is_legal(&mut state, Wall::new(8, 8, Orientation::Horizontal)));
    }

    #[test]
    fn fresh_state_satisfies_all_invariants() {
        assert!(check_invariants(&fresh()).is_ok());
    }

    #[test]
    fn coincident_pawns_violate_invariants() {
        let mut state = fresh();
        state.player2.position = state.player1.position;
        assert!(check_invariants(&state).is_err());
    }

    #[test]
    fn wall_counter_mismatch_violates_invariants() {
        let mut state = fresh();
        state.player1.walls_remaining = 3; // no corresponding walls placed
        assert!(check_invariants(&state).is_err());
    }

    #[test]
    fn finished_status_without_a_winner_violates_invariants() {
        let mut state = fresh();
        state.player1.position = (0, 4);
        state.status = crate::game::Status::Finished;
        assert!(check_invariants(&state).is_err());
    }
}
