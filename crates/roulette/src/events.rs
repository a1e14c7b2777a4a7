use spindle::ItemId;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Spin,
    SpinComplete,
    AddItem(String),
    RenameItem(ItemId, String),
    RemoveItem(ItemId),
    ReplaceItems(Vec<String>),
    List,
    ConfigReload,
    Quit,
}
