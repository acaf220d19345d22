//! Translated console text.

/// Every piece of user-facing text, for one language.
///
/// Entries containing `{}` are templates filled in by [`super::Console`].
#[derive(Debug)]
pub struct Messages {
    // Success messages
    pub success: &'static str,
    pub restart: &'static str,
    pub locked: &'static str,
    pub unlocked: &'static str,

    // Progress messages
    pub reading_config: &'static str,
    pub writing_config: &'static str,

    // Error messages
    pub error_prefix: &'static str,
    pub privilege_error: &'static str,
    pub no_document: &'static str,
    pub missing_ids: &'static str,

    // Instructions
    pub run_as_admin: &'static str,
    pub run_with_sudo: &'static str,
    pub sudo_example: &'static str,
    pub read_only_warning: &'static str,

    // Info messages
    pub config_location: &'static str,
    pub operation_completed: &'static str,
}

pub static EN: Messages = Messages {
    success: "[√] Configuration file updated successfully!",
    restart: "[!] Please restart Cursor manually for changes to take effect",
    locked: "[√] storage.json is now read-only",
    unlocked: "[√] storage.json is writable again",

    reading_config: "Reading configuration file...",
    writing_config: "Writing new identifiers...",

    error_prefix: "Program encountered a serious error: {}",
    privilege_error: "[!] Error: Administrator privileges required",
    no_document: "No configuration file exists yet at this location",
    missing_ids: "The configuration file does not contain a full set of identifiers; run write first",

    run_as_admin: "Please right-click and select 'Run as Administrator'",
    run_with_sudo: "Please run this program with sudo",
    sudo_example: "Example: sudo {}",
    read_only_warning: "Set storage.json to read-only mode, which will cause issues such as lost workspace records",

    config_location: "Config file location:",
    operation_completed: "Operation completed!",
};

pub static CN: Messages = Messages {
    success: "[√] 配置文件已成功更新！",
    restart: "[!] 请手动重启 Cursor 以使更新生效",
    locked: "[√] storage.json 已设为只读",
    unlocked: "[√] storage.json 已恢复可写",

    reading_config: "正在读取配置文件...",
    writing_config: "正在写入新的标识符...",

    error_prefix: "程序发生严重错误: {}",
    privilege_error: "[!] 错误：需要管理员权限",
    no_document: "该位置尚不存在配置文件",
    missing_ids: "配置文件中的标识符不完整，请先执行 write",

    run_as_admin: "请右键点击程序，选择「以管理员身份运行」",
    run_with_sudo: "请使用 sudo 命令运行此程序",
    sudo_example: "示例: sudo {}",
    read_only_warning: "设置 storage.json 为只读模式, 这将导致 workspace 记录信息丢失等问题",

    config_location: "配置文件位置:",
    operation_completed: "操作完成！",
};

pub static PT_BR: Messages = Messages {
    success: "[√] Arquivo de configuração atualizado com sucesso!",
    restart: "[!] Por favor, reinicie o Cursor manualmente para que as alterações tenham efeito",
    locked: "[√] storage.json agora está somente leitura",
    unlocked: "[√] storage.json voltou a ser gravável",

    reading_config: "Lendo arquivo de configuração...",
    writing_config: "Gravando novos identificadores...",

    error_prefix: "O programa encontrou um erro grave: {}",
    privilege_error: "[!] Erro: Privilégios de administrador necessários",
    no_document: "Ainda não existe arquivo de configuração neste local",
    missing_ids: "O arquivo de configuração não contém todos os identificadores; execute write primeiro",

    run_as_admin: "Por favor, clique com o botão direito e selecione 'Executar como Administrador'",
    run_with_sudo: "Por favor, execute este programa com sudo",
    sudo_example: "Exemplo: sudo {}",
    read_only_warning: "Definir storage.json como somente leitura, o que causará problemas como perda de registros do workspace",

    config_location: "Localização do arquivo de configuração:",
    operation_completed: "Operação concluída!",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_one_placeholder() {
        for table in [&EN, &CN, &PT_BR] {
            assert_eq!(table.error_prefix.matches("{}").count(), 1);
            assert_eq!(table.sudo_example.matches("{}").count(), 1);
        }
    }
}
