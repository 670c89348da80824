use serde::Serialize;

use super::domain::House;
use super::status::BoardColumn;

/// One display column with its member houses in triage-priority order.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumnView {
    pub column: BoardColumn,
    pub count: usize,
    pub houses: Vec<House>,
}

/// Group houses into board columns and order each column by the status
/// rank table. The sort is stable, so houses sharing a status keep the
/// order the store returned them in (id order).
pub fn board_columns(houses: &[House]) -> Vec<BoardColumnView> {
    BoardColumn::ALL
        .into_iter()
        .map(|column| {
            let mut members: Vec<House> = houses
                .iter()
                .filter(|house| house.status.column() == column)
                .cloned()
                .collect();
            members.sort_by_key(|house| house.status.column_rank());

            BoardColumnView {
                column,
                count: members.len(),
                houses: members,
            }
        })
        .collect()
}
